#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// White always moves first.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White = 0,
    Black = 1,
}

/// The contents of an occupied square. An empty square is `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub side: Side,
    pub piece: Piece,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastleWing {
    QueenSide = 0,
    KingSide = 1,
}

/// A single ply. Equality is structural over origin, destination and promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<ColoredPiece>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Checkmate(Side), // Winner
    Stalemate,
    DrawByFiftyMoveRule,
}

/// Domain errors surfaced to callers. None of them is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid move string: {0}")]
    InvalidMove(String),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(char),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
