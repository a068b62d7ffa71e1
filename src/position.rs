use tracing::{trace, warn};

use crate::{
    bitboard::BitBoard,
    castling::CastlingRights,
    constants::{
        BISHOP_DIRECTIONS, FIFTY_MOVE_RULE_PLY, INIT_BOARD, INIT_COLOR, KING_OFFSETS,
        KNIGHT_OFFSETS, NUM_FILES, NUM_RANKS, NUM_SQUARES, PROMOTION_PIECES, ROOK_DIRECTIONS,
    },
    types::{CastleWing, ColoredPiece, GameResult, Move, Piece, Side, Square},
};

#[derive(Clone, Debug)]
pub struct Position {
    pub board: [Option<ColoredPiece>; NUM_SQUARES],
    pub side: Side,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // Square passed over by the last double pawn push
    pub halfmove_clock: u16,        // Plies since last pawn move or capture
    pub fullmove_number: u16,       // Incremented after black's move
    legal_moves: Vec<Move>,         // Valid only after `generate_legal_moves`
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares the persistent state only; the legal-move cache is ignored.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side == other.side
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Position {}

impl Position {
    /// The standard starting array, white to move.
    pub fn new() -> Self {
        let mut position = Self::empty();

        for square in Square::iter() {
            let piece = Piece::try_from(INIT_BOARD[square.index()]);
            let side = Side::try_from(INIT_COLOR[square.index()]);

            if let (Ok(piece), Ok(side)) = (piece, side) {
                position.board[square.index()] = Some(ColoredPiece::new(side, piece));
            }
        }

        position.castling = CastlingRights::ALL;
        position
    }

    /// No pieces, no castling rights, white to move.
    pub fn empty() -> Self {
        Self {
            board: [None; NUM_SQUARES],
            side: Side::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            legal_moves: Vec::new(),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<ColoredPiece> {
        self.board[square.index()]
    }

    /// Edits the board directly. Invalidates the legal-move cache.
    pub fn set_piece(&mut self, square: Square, unit: Option<ColoredPiece>) {
        self.board[square.index()] = unit;
        self.legal_moves.clear();
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        Square::iter().find(|&square| {
            self.board[square.index()] == Some(ColoredPiece::new(side, Piece::King))
        })
    }

    /// Moves produced by the most recent `generate_legal_moves` call.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Membership test against the cached legal-move list.
    /// Call `generate_legal_moves` first if the cache may be stale.
    pub fn is_legal(&self, move_: &Move) -> bool {
        self.legal_moves.contains(move_)
    }

    // ------------------------------------------------------------------
    // Attack detection
    // ------------------------------------------------------------------

    /// Every square a piece of `attacker` could move into, ignoring self-check.
    /// Sliding attacks include the first occupied square on each ray, whatever its color.
    pub fn compute_attack_map(&self, attacker: Side) -> BitBoard {
        let mut attacks = BitBoard::EMPTY;

        for square in Square::iter() {
            let Some(unit) = self.board[square.index()] else {
                continue;
            };

            if unit.side != attacker {
                continue;
            }

            match unit.piece {
                Piece::Pawn => {
                    for file_delta in [-1, 1] {
                        if let Some(target) = square.offset(file_delta, attacker.pawn_direction()) {
                            attacks.set_bit(target);
                        }
                    }
                }
                Piece::Knight => self.mark_steps(square, &KNIGHT_OFFSETS, &mut attacks),
                Piece::Bishop => self.mark_rays(square, &BISHOP_DIRECTIONS, &mut attacks),
                Piece::Rook => self.mark_rays(square, &ROOK_DIRECTIONS, &mut attacks),
                Piece::Queen => {
                    self.mark_rays(square, &BISHOP_DIRECTIONS, &mut attacks);
                    self.mark_rays(square, &ROOK_DIRECTIONS, &mut attacks);
                }
                Piece::King => self.mark_steps(square, &KING_OFFSETS, &mut attacks),
            }
        }

        attacks
    }

    fn mark_steps(&self, square: Square, offsets: &[(i8, i8)], attacks: &mut BitBoard) {
        for &(file_delta, rank_delta) in offsets {
            if let Some(target) = square.offset(file_delta, rank_delta) {
                attacks.set_bit(target);
            }
        }
    }

    fn mark_rays(&self, square: Square, directions: &[(i8, i8)], attacks: &mut BitBoard) {
        for &(file_delta, rank_delta) in directions {
            let mut current = square;

            while let Some(target) = current.offset(file_delta, rank_delta) {
                attacks.set_bit(target);

                if self.board[target.index()].is_some() {
                    break;
                }

                current = target;
            }
        }
    }

    /// Attack map of the side NOT to move.
    pub fn attack_map(&self) -> BitBoard {
        self.compute_attack_map(self.side.opponent())
    }

    pub fn is_square_attacked_by_side(&self, side: Side, square: Square) -> bool {
        self.compute_attack_map(side).is_bit_set(square)
    }

    /// Whether the side to move has its king attacked. A side without a king is never in check.
    pub fn is_in_check(&self) -> bool {
        match self.king_square(self.side) {
            Some(king) => self.attack_map().is_bit_set(king),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Move generation
    // ------------------------------------------------------------------

    /// Generates every legal move for the side to move and caches the list.
    /// An empty list means checkmate or stalemate.
    pub fn generate_legal_moves(&mut self) -> &[Move] {
        let attacks = self.attack_map();
        let mut moves = Vec::with_capacity(48);

        for square in Square::iter() {
            let Some(unit) = self.board[square.index()] else {
                continue;
            };

            if unit.side != self.side {
                continue;
            }

            match unit.piece {
                Piece::Pawn => self.generate_pawn_moves(square, &mut moves),
                Piece::Knight => self.generate_step_moves(square, &KNIGHT_OFFSETS, &mut moves),
                Piece::Bishop => self.generate_slider_moves(square, &BISHOP_DIRECTIONS, &mut moves),
                Piece::Rook => self.generate_slider_moves(square, &ROOK_DIRECTIONS, &mut moves),
                Piece::Queen => {
                    self.generate_slider_moves(square, &BISHOP_DIRECTIONS, &mut moves);
                    self.generate_slider_moves(square, &ROOK_DIRECTIONS, &mut moves);
                }
                Piece::King => {
                    self.generate_step_moves(square, &KING_OFFSETS, &mut moves);
                    self.generate_castle_moves(square, attacks, &mut moves);
                }
            }
        }

        self.legal_moves = moves;
        &self.legal_moves
    }

    /// Self-check filter: keeps `move_` only if the mover's king is safe afterwards.
    fn add_move(&self, move_: Move, moves: &mut Vec<Move>) {
        let next = self.apply_move(&move_);

        let king_safe = match next.king_square(self.side) {
            Some(king) => !next.is_square_attacked_by_side(self.side.opponent(), king),
            None => true,
        };

        if king_safe {
            moves.push(move_);
        }
    }

    fn is_enemy(&self, square: Square) -> bool {
        matches!(self.board[square.index()], Some(unit) if unit.side != self.side)
    }

    fn is_empty_square(&self, square: Square) -> bool {
        self.board[square.index()].is_none()
    }

    fn add_pawn_moves(&self, from: Square, to: Square, moves: &mut Vec<Move>) {
        if to.rank() == self.side.promotion_rank() {
            for piece in PROMOTION_PIECES {
                let promotion = ColoredPiece::new(self.side, piece);
                self.add_move(Move::new(from, to, Some(promotion)), moves);
            }
        } else {
            self.add_move(Move::new(from, to, None), moves);
        }
    }

    fn generate_pawn_moves(&self, square: Square, moves: &mut Vec<Move>) {
        let direction = self.side.pawn_direction();

        if let Some(one_step) = square.offset(0, direction) {
            if self.is_empty_square(one_step) {
                self.add_pawn_moves(square, one_step, moves);

                if square.rank() == self.side.pawn_rank() {
                    if let Some(two_step) = square.offset(0, 2 * direction) {
                        if self.is_empty_square(two_step) {
                            self.add_move(Move::new(square, two_step, None), moves);
                        }
                    }
                }
            }
        }

        for file_delta in [-1, 1] {
            if let Some(target) = square.offset(file_delta, direction) {
                if self.is_enemy(target) || self.en_passant == Some(target) {
                    self.add_pawn_moves(square, target, moves);
                }
            }
        }
    }

    fn generate_step_moves(&self, square: Square, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(file_delta, rank_delta) in offsets {
            if let Some(target) = square.offset(file_delta, rank_delta) {
                if self.is_empty_square(target) || self.is_enemy(target) {
                    self.add_move(Move::new(square, target, None), moves);
                }
            }
        }
    }

    fn generate_slider_moves(
        &self,
        square: Square,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(file_delta, rank_delta) in directions {
            let mut current = square;

            while let Some(target) = current.offset(file_delta, rank_delta) {
                if self.is_empty_square(target) {
                    self.add_move(Move::new(square, target, None), moves);
                    current = target;
                    continue;
                }

                if self.is_enemy(target) {
                    self.add_move(Move::new(square, target, None), moves);
                }

                break;
            }
        }
    }

    /// The king's square, the squares it crosses and its destination must not be attacked.
    /// Both wings may be generated in the same call.
    fn generate_castle_moves(&self, king: Square, attacks: BitBoard, moves: &mut Vec<Move>) {
        let rank = self.side.back_rank();

        if king != Self::square_on(4, rank) {
            return;
        }

        let own_rook = Some(ColoredPiece::new(self.side, Piece::Rook));

        let wings = [
            (CastleWing::QueenSide, 0, &[1u8, 2, 3][..], [4u8, 3, 2], 2u8),
            (CastleWing::KingSide, 7, &[5u8, 6][..], [4u8, 5, 6], 6u8),
        ];

        for (wing, rook_file, between, king_path, destination) in wings {
            if !self.castling.has(self.side, wing)
                || self.board[Self::square_on(rook_file, rank).index()] != own_rook
            {
                continue;
            }

            let path_clear = between
                .iter()
                .all(|&file| self.is_empty_square(Self::square_on(file, rank)));

            let path_safe = king_path
                .iter()
                .all(|&file| !attacks.is_bit_set(Self::square_on(file, rank)));

            if path_clear && path_safe {
                self.add_move(Move::new(king, Self::square_on(destination, rank), None), moves);
            }
        }
    }

    /// Only called with in-range coordinates.
    fn square_on(file: u8, rank: u8) -> Square {
        Square::ALL[rank as usize * NUM_FILES + file as usize]
    }

    // ------------------------------------------------------------------
    // Move application
    // ------------------------------------------------------------------

    /// Pure transition: returns the position after `move_`, leaving `self` untouched.
    /// The move is not validated; pass moves taken from the legal-move list.
    pub fn apply_move(&self, move_: &Move) -> Position {
        let mut next = Position {
            board: self.board,
            side: self.side,
            castling: self.castling,
            en_passant: None,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            legal_moves: Vec::new(),
        };

        let (from, to) = (move_.from, move_.to);

        let Some(moving) = self.board[from.index()] else {
            warn!(%move_, "applying a move from an empty square");
            return next;
        };

        let captured = self.board[to.index()];

        if moving.piece == Piece::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        next.board[from.index()] = None;

        match moving.piece {
            Piece::Pawn if to.rank() == moving.side.promotion_rank() => {
                let promotion = move_
                    .promotion
                    .unwrap_or(ColoredPiece::new(moving.side, Piece::Queen));
                next.board[to.index()] = Some(promotion);
            }
            Piece::King if from.rank() == to.rank() && from.file().abs_diff(to.file()) == 2 => {
                let (rook_from, rook_to) = match to.file() > from.file() {
                    true => (7, 5),
                    false => (0, 3),
                };
                let rank = from.rank();

                next.board[Self::square_on(rook_from, rank).index()] = None;
                next.board[Self::square_on(rook_to, rank).index()] =
                    Some(ColoredPiece::new(moving.side, Piece::Rook));
                next.board[to.index()] = Some(moving);
            }
            Piece::Pawn if from.file() != to.file() && captured.is_none() => {
                // En passant: the captured pawn sits beside the origin, behind the destination
                next.board[Self::square_on(to.file(), from.rank()).index()] = None;
                next.board[to.index()] = Some(moving);
            }
            _ => {
                next.board[to.index()] = Some(moving);
            }
        }

        next.side = self.side.opponent();

        if next.side == Side::White {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        if moving.piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            next.en_passant = Some(Self::square_on(from.file(), (from.rank() + to.rank()) / 2));
        }

        if moving.piece == Piece::King {
            next.castling.revoke_side(moving.side);
        }
        next.castling.update(from, to);

        trace!(%move_, "applied move");
        next
    }

    // ------------------------------------------------------------------
    // Game state
    // ------------------------------------------------------------------

    /// Regenerates the legal moves and classifies the position.
    pub fn check_game_result(&mut self) -> GameResult {
        if self.generate_legal_moves().is_empty() {
            return match self.is_in_check() {
                true => GameResult::Checkmate(self.side.opponent()),
                false => GameResult::Stalemate,
            };
        }

        if self.halfmove_clock >= FIFTY_MOVE_RULE_PLY {
            return GameResult::DrawByFiftyMoveRule;
        }

        GameResult::InProgress
    }

    /// Rank 8 at the top unless flipped.
    pub fn board_string(&self, flip: bool) -> String {
        let mut out = String::new();

        let ranks: Vec<u8> = match flip {
            false => (0..NUM_RANKS as u8).rev().collect(),
            true => (0..NUM_RANKS as u8).collect(),
        };
        let files: Vec<u8> = match flip {
            false => (0..NUM_FILES as u8).collect(),
            true => (0..NUM_FILES as u8).rev().collect(),
        };

        for &rank in &ranks {
            out.push_str(&format!("{} ", rank + 1));
            for &file in &files {
                let c = match self.board[Self::square_on(file, rank).index()] {
                    Some(unit) => unit.to_char(),
                    None => '.',
                };
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }

        out.push_str("  ");
        for &file in &files {
            out.push(' ');
            out.push((b'a' + file) as char);
        }
        out.push('\n');

        out
    }

    pub fn display_board(&self, flip: bool) {
        println!("\n{}", self.board_string(flip));
    }
}
