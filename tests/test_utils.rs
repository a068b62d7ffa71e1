#![allow(dead_code)]

/// Shared helpers for the integration tests
use shannon_chess::{
    engine::{Engine, SearchSettings, Strategy},
    position::Position,
    types::{ColoredPiece, Move, Piece, Side, Square},
};

/// Create a test move
pub fn create_test_move(from: Square, to: Square) -> Move {
    Move::new(from, to, None)
}

pub fn promotion_move(from: Square, to: Square, side: Side, piece: Piece) -> Move {
    Move::new(from, to, Some(ColoredPiece::new(side, piece)))
}

pub fn position_from_fen(fen: &str) -> Position {
    let mut position =
        Position::from_fen(fen).unwrap_or_else(|e| panic!("Failed to load FEN {}: {}", fen, e));
    position.generate_legal_moves();
    position
}

pub fn engine_from_fen(fen: &str, depth: u16) -> Engine {
    let mut engine = Engine::new(SearchSettings {
        max_depth: depth,
        strategy: Strategy::Minimax,
        seed: None,
    });
    engine
        .load_fen(fen)
        .unwrap_or_else(|e| panic!("Failed to load FEN {}: {}", fen, e));
    engine
}

/// Kings on e1 and e8, nothing else.
pub fn empty_position_with_kings(side_to_move: Side) -> Position {
    let mut position = Position::empty();
    position.set_piece(Square::E1, Some(ColoredPiece::new(Side::White, Piece::King)));
    position.set_piece(Square::E8, Some(ColoredPiece::new(Side::Black, Piece::King)));
    position.side = side_to_move;
    position
}

pub fn put(position: &mut Position, square: Square, side: Side, piece: Piece) {
    position.set_piece(square, Some(ColoredPiece::new(side, piece)));
}

pub fn move_pairs(position: &Position) -> Vec<(Square, Square)> {
    position
        .legal_moves()
        .iter()
        .map(|mv| (mv.from, mv.to))
        .collect()
}

pub fn move_strings(position: &Position) -> Vec<String> {
    let mut moves: Vec<String> = position
        .legal_moves()
        .iter()
        .map(|mv| mv.to_uci_string())
        .collect();
    moves.sort();
    moves
}

pub fn moves_from(position: &Position, from: Square) -> Vec<Move> {
    position
        .legal_moves()
        .iter()
        .filter(|mv| mv.from == from)
        .copied()
        .collect()
}
