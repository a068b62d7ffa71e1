use crate::types::Piece;

/// NOTE: 1 ply = one move by a single player

pub const NUM_SQUARES: usize = 64;
pub const NUM_PIECE_TYPES: usize = 6;
pub const NUM_SIDES: usize = 2;
pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Default minimax depth (in ply).
pub const DEFAULT_MAX_DEPTH: u16 = 4;

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_RULE_PLY: u16 = 100;

// Benchmark
pub const DEFAULT_BENCHMARK_GAMES: usize = 100;
pub const DEFAULT_BENCHMARK_DEPTH: u16 = 2;
pub const BENCHMARK_MAX_PLY: usize = 99;
pub const BENCHMARK_SEED: u64 = 1;

// Search scores. Material never exceeds a few hundred, so the sentinels dominate it.
pub const MATE_SCORE: i32 = 2000;
pub const STALEMATE_SCORE: i32 = 1000;
pub const INFINITY_SCORE: i32 = 10_000;

/// Indexed by `Piece as usize`.
pub const MATERIAL_VALUE: [i32; NUM_PIECE_TYPES] = [1, 3, 3, 5, 9, 200];

pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

/// (file, rank) deltas
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 0 = white, 1 = black, 6 = empty
#[rustfmt::skip]
pub const INIT_COLOR: [u8; NUM_SQUARES] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1
];

/// `Piece as u8`, 6 = empty
#[rustfmt::skip]
pub const INIT_BOARD: [u8; NUM_SQUARES] = [
    3, 1, 2, 4, 5, 2, 1, 3,
    0, 0, 0, 0, 0, 0, 0, 0,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    0, 0, 0, 0, 0, 0, 0, 0,
    3, 1, 2, 4, 5, 2, 1, 3
];

/// Castling rights bits.
///
/// 0001 white kingside
/// 0010 white queenside
/// 0100 black kingside
/// 1000 black queenside
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING_RIGHTS: u8 = 0b1111;

/// Used to determine the castle permissions after a move.
/// We logical-AND the castle bits with the CASTLE_MASK bits for
/// both of the move's squares.
///
/// If white may castle kingside (0001) and the rook on h1 moves or
/// gets captured, castle is ANDed with CASTLE_MASK[7] (1110) and the
/// right is gone for good. A king leaving e1/e8 clears both bits of its side.
#[rustfmt::skip]
pub const CASTLE_MASK: [u8; NUM_SQUARES] = [
    13, 15, 15, 15, 12, 15, 15, 14,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
     7, 15, 15, 15,  3, 15, 15, 11
];
