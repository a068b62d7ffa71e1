use std::{fmt, str::FromStr};

use crate::types::{ChessError, ColoredPiece, Move, Piece, Square};

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<ColoredPiece>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Parse a coordinate move string (e.g. "e2e4", "e7e8Q", "e2e1q").
    /// The promotion letter's case selects its side.
    pub fn from_uci_string(move_str: &str) -> Result<Move, ChessError> {
        let chars: Vec<char> = move_str.chars().collect();

        if chars.len() != 4 && chars.len() != 5 {
            return Err(ChessError::InvalidMove(format!(
                "expected 4 or 5 characters, got {:?}",
                move_str
            )));
        }

        let parse_square = |file: char, rank: char| {
            let mut buf = String::with_capacity(2);
            buf.push(file);
            buf.push(rank);
            Square::from_algebraic(&buf).ok_or_else(|| {
                ChessError::InvalidMove(format!("bad square {:?} in {:?}", buf, move_str))
            })
        };

        let from = parse_square(chars[0], chars[1])?;
        let to = parse_square(chars[2], chars[3])?;

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match ColoredPiece::from_char(c) {
                Some(unit) if !matches!(unit.piece, Piece::Pawn | Piece::King) => Some(unit),
                _ => return Err(ChessError::InvalidPromotion(c)),
            },
        };

        Ok(Move::new(from, to, promotion))
    }

    pub fn to_uci_string(&self) -> String {
        let mut result = format!("{}{}", self.from, self.to);

        if let Some(unit) = self.promotion {
            result.push(unit.to_char());
        }

        result
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci_string(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci_string())
    }
}
