use crate::{
    constants::{
        ALL_CASTLING_RIGHTS, BLACK_KINGSIDE, BLACK_QUEENSIDE, CASTLE_MASK, WHITE_KINGSIDE,
        WHITE_QUEENSIDE,
    },
    types::{CastleWing, Side, Square},
};

/// Four independent {side, wing} castling rights packed into the low nibble.
/// Rights are only ever removed, never re-granted by play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights(pub u8);

impl Default for CastlingRights {
    fn default() -> Self {
        Self(ALL_CASTLING_RIGHTS)
    }
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(ALL_CASTLING_RIGHTS);

    const fn bit(side: Side, wing: CastleWing) -> u8 {
        match (side, wing) {
            (Side::White, CastleWing::KingSide) => WHITE_KINGSIDE,
            (Side::White, CastleWing::QueenSide) => WHITE_QUEENSIDE,
            (Side::Black, CastleWing::KingSide) => BLACK_KINGSIDE,
            (Side::Black, CastleWing::QueenSide) => BLACK_QUEENSIDE,
        }
    }

    pub fn has(self, side: Side, wing: CastleWing) -> bool {
        self.0 & Self::bit(side, wing) != 0
    }

    pub fn grant(&mut self, side: Side, wing: CastleWing) {
        self.0 |= Self::bit(side, wing);
    }

    pub fn revoke(&mut self, side: Side, wing: CastleWing) {
        self.0 &= !Self::bit(side, wing);
    }

    pub fn revoke_side(&mut self, side: Side) {
        self.revoke(side, CastleWing::KingSide);
        self.revoke(side, CastleWing::QueenSide);
    }

    /// Clears every right touched by a move between `from` and `to`:
    /// a king leaving its home square, a rook leaving its corner, or a capture on a corner.
    pub fn update(&mut self, from: Square, to: Square) {
        self.0 &= CASTLE_MASK[from.index()] & CASTLE_MASK[to.index()];
    }

    /// "KQkq" subset in canonical order, or "-".
    pub fn to_fen(self) -> String {
        let mut s = String::with_capacity(4);

        for (side, wing, c) in [
            (Side::White, CastleWing::KingSide, 'K'),
            (Side::White, CastleWing::QueenSide, 'Q'),
            (Side::Black, CastleWing::KingSide, 'k'),
            (Side::Black, CastleWing::QueenSide, 'q'),
        ] {
            if self.has(side, wing) {
                s.push(c);
            }
        }

        if s.is_empty() {
            s.push('-');
        }

        s
    }

    /// Parses "-" or any subset of "KQkq" in any order.
    pub fn from_fen(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(Self::NONE);
        }

        if s.is_empty() {
            return None;
        }

        let mut rights = Self::NONE;

        for c in s.chars() {
            match c {
                'K' => rights.grant(Side::White, CastleWing::KingSide),
                'Q' => rights.grant(Side::White, CastleWing::QueenSide),
                'k' => rights.grant(Side::Black, CastleWing::KingSide),
                'q' => rights.grant(Side::Black, CastleWing::QueenSide),
                _ => return None,
            }
        }

        Some(rights)
    }
}
