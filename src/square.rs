use std::fmt;

use crate::{
    constants::{NUM_FILES, NUM_RANKS},
    types::Square,
};

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; 64] = [
        Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
        Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
        Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
        Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
        Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
        Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
        Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
        Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
    ];

    pub fn iter() -> impl Iterator<Item = Square> {
        Self::ALL.into_iter()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn as_bit(self) -> u64 {
        1u64 << (self as u64)
    }

    /// 0-indexed (0-7)
    pub fn rank(self) -> u8 {
        self as u8 / NUM_FILES as u8
    }
    /// 0-indexed (0-7)
    pub fn file(self) -> u8 {
        (self as u8) % (NUM_FILES as u8)
    }

    pub fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if (file as usize) < NUM_FILES && (rank as usize) < NUM_RANKS {
            Some(Self::ALL[rank as usize * NUM_FILES + file as usize])
        } else {
            None
        }
    }

    /// The square `file_delta` files and `rank_delta` ranks away, if it is on the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;

        if file < 0 || rank < 0 {
            return None;
        }

        Self::from_file_rank(file as u8, rank as u8)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        Self::from_file_rank(bytes[0].wrapping_sub(b'a'), bytes[1].wrapping_sub(b'1'))
    }

    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
