use std::str::FromStr;

use crate::{
    castling::CastlingRights,
    constants::{NUM_FILES, NUM_RANKS},
    position::Position,
    types::{ChessError, ColoredPiece, Side, Square},
};

fn fen_error(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

impl Position {
    /// Parses a six-field FEN string. The two clock fields may be omitted,
    /// in which case they default to 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Position, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() != 6 && fields.len() != 4 {
            return Err(fen_error(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        }

        let mut position = Position::empty();

        Self::parse_placement(fields[0], &mut position)?;

        position.side = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(fen_error(format!("bad side to move {:?}", other))),
        };

        position.castling = CastlingRights::from_fen(fields[2])
            .ok_or_else(|| fen_error(format!("bad castling field {:?}", fields[2])))?;

        position.en_passant = match fields[3] {
            "-" => None,
            s => {
                let square = Square::from_algebraic(s)
                    .ok_or_else(|| fen_error(format!("bad en passant square {:?}", s)))?;

                // The square a double push by the side not to move passes over
                let pusher = position.side.opponent();
                let expected_rank = pusher.pawn_rank() as i8 + pusher.pawn_direction();

                if square.rank() as i8 != expected_rank {
                    return Err(fen_error(format!(
                        "en passant square {} is not on rank {}",
                        s,
                        expected_rank + 1
                    )));
                }

                Some(square)
            }
        };

        if fields.len() == 6 {
            position.halfmove_clock = fields[4]
                .parse()
                .map_err(|_| fen_error(format!("bad halfmove clock {:?}", fields[4])))?;
            position.fullmove_number = fields[5]
                .parse()
                .map_err(|_| fen_error(format!("bad fullmove number {:?}", fields[5])))?;
        }

        Ok(position)
    }

    /// Rank 8 first, files a to h within each rank.
    fn parse_placement(placement: &str, position: &mut Position) -> Result<(), ChessError> {
        let ranks: Vec<&str> = placement.split('/').collect();

        if ranks.len() != NUM_RANKS {
            return Err(fen_error(format!(
                "expected {} ranks, found {}",
                NUM_RANKS,
                ranks.len()
            )));
        }

        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = (NUM_RANKS - 1 - i) as u8;
            let mut file: usize = 0;

            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip as usize > NUM_FILES {
                        return Err(fen_error(format!("bad empty-square count {:?}", c)));
                    }
                    file += skip as usize;
                } else {
                    let unit = ColoredPiece::from_char(c)
                        .ok_or_else(|| fen_error(format!("unknown piece letter {:?}", c)))?;

                    let square = Square::from_file_rank(file as u8, rank).ok_or_else(|| {
                        fen_error(format!("rank {} has more than 8 files", rank + 1))
                    })?;

                    position.board[square.index()] = Some(unit);
                    file += 1;
                }

                if file > NUM_FILES {
                    return Err(fen_error(format!("rank {} has more than 8 files", rank + 1)));
                }
            }

            if file != NUM_FILES {
                return Err(fen_error(format!(
                    "rank {} covers {} files, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        Ok(())
    }

    /// Six-field FEN, empty squares run-length encoded.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();

        for rank in (0..NUM_RANKS as u8).rev() {
            let mut empty = 0;

            for file in 0..NUM_FILES as u8 {
                let unit = Square::from_file_rank(file, rank).and_then(|sq| self.piece_at(sq));

                match unit {
                    Some(unit) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(unit.to_char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                placement.push_str(&empty.to_string());
            }

            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.side {
            Side::White => "w",
            Side::Black => "b",
        };

        let en_passant = match self.en_passant {
            Some(square) => square.to_algebraic(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement,
            side,
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
