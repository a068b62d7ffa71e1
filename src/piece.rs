use crate::{
    constants::MATERIAL_VALUE,
    types::{ColoredPiece, Piece, Side},
};

impl Piece {
    /// Weight used by the material evaluation: king 200, queen 9, rook 5, minors 3, pawn 1.
    pub const fn material_value(self) -> i32 {
        MATERIAL_VALUE[self as usize]
    }

    /// Lowercase letter for the piece kind.
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    pub fn iter() -> impl Iterator<Item = Piece> {
        [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ]
        .into_iter()
    }
}

impl TryFrom<u8> for Piece {
    type Error = &'static str;

    /// Converts from a number representing the piece
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Piece::iter()
            .nth(value as usize)
            .ok_or("Piece index out of range (must be 0-5)")
    }
}

impl ColoredPiece {
    pub const fn new(side: Side, piece: Piece) -> Self {
        Self { side, piece }
    }

    /// Uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        match self.side {
            Side::White => self.piece.to_char().to_ascii_uppercase(),
            Side::Black => self.piece.to_char(),
        }
    }

    /// Letter case selects the side.
    pub fn from_char(c: char) -> Option<Self> {
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };

        let side = match c.is_ascii_uppercase() {
            true => Side::White,
            false => Side::Black,
        };

        Some(Self { side, piece })
    }

    /// Material weight signed by side: positive for white, negative for black.
    pub fn signed_value(self) -> i32 {
        self.piece.material_value() * self.side.sign()
    }
}
