use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::debug;

use crate::{
    constants::{INFINITY_SCORE, MATE_SCORE, STALEMATE_SCORE},
    position::Position,
    types::{ChessError, Move, Side},
};

/// Material balance: positive favors white, negative favors black.
/// Independent of the side to move.
pub fn evaluate(position: &Position) -> i32 {
    position
        .board
        .iter()
        .flatten()
        .map(|unit| unit.signed_value())
        .sum()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>, // None when the side to move has no legal moves
    pub score: i32,              // White-positive
    pub nodes: u64,
    pub depth: u16,
}

/// A strategy that picks one move for the side to move.
pub trait Player {
    /// Regenerates the legal moves of `position` and searches it.
    fn search(&mut self, position: &mut Position) -> SearchResult;

    fn name(&self) -> &str;

    /// Players without a search horizon ignore this.
    fn set_depth(&mut self, _depth: u16) {}

    fn choose_move(&mut self, position: &mut Position) -> Result<Move, ChessError> {
        self.search(position)
            .best_move
            .ok_or(ChessError::NoLegalMoves)
    }
}

/// Picks uniformly among the legal moves.
pub struct RandomPlayer {
    rng: StdRng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn search(&mut self, position: &mut Position) -> SearchResult {
        let best_move = position.generate_legal_moves().choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: evaluate(position),
            nodes: 1,
            depth: 0,
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Fixed-depth full-width minimax over material evaluation.
///
/// White maximizes and black minimizes at every layer, whichever side is
/// at the root. Checkmate scores `MATE_SCORE` against the mated side;
/// stalemate scores `STALEMATE_SCORE` against the side that started the search.
pub struct MinimaxPlayer {
    pub max_depth: u16,
    pub nodes: u64,      // Nodes visited by the last search
    pub last_score: i32, // Root score of the last search
}

impl MinimaxPlayer {
    pub fn new(max_depth: u16) -> Self {
        Self {
            max_depth,
            nodes: 0,
            last_score: 0,
        }
    }

    /// Terminal score of a node with no moves left or no depth left, if any.
    /// `mated` is the score when the side to move is checkmated.
    fn leaf_score(
        position: &Position,
        moves: &[Move],
        depth: u16,
        mated: i32,
        stalemate: i32,
    ) -> Option<(Option<Move>, i32)> {
        if moves.is_empty() {
            let score = match position.is_in_check() {
                true => mated,
                false => stalemate,
            };
            return Some((None, score));
        }

        if depth == 0 {
            return Some((moves.first().copied(), evaluate(position)));
        }

        None
    }

    /// White to move: keeps the highest score, first seen wins ties.
    fn maximize(
        &mut self,
        position: &mut Position,
        depth: u16,
        stalemate: i32,
    ) -> (Option<Move>, i32) {
        self.nodes += 1;

        let moves = position.generate_legal_moves().to_vec();

        if let Some(leaf) = Self::leaf_score(position, &moves, depth, -MATE_SCORE, stalemate) {
            return leaf;
        }

        let mut best_move = None;
        let mut best_score = -INFINITY_SCORE;

        for move_ in moves {
            let mut child = position.apply_move(&move_);
            let (_, score) = self.minimize(&mut child, depth - 1, stalemate);

            if score > best_score {
                best_score = score;
                best_move = Some(move_);
            }
        }

        (best_move, best_score)
    }

    /// Black to move: keeps the lowest score, first seen wins ties.
    fn minimize(
        &mut self,
        position: &mut Position,
        depth: u16,
        stalemate: i32,
    ) -> (Option<Move>, i32) {
        self.nodes += 1;

        let moves = position.generate_legal_moves().to_vec();

        if let Some(leaf) = Self::leaf_score(position, &moves, depth, MATE_SCORE, stalemate) {
            return leaf;
        }

        let mut best_move = None;
        let mut best_score = INFINITY_SCORE;

        for move_ in moves {
            let mut child = position.apply_move(&move_);
            let (_, score) = self.maximize(&mut child, depth - 1, stalemate);

            if score < best_score {
                best_score = score;
                best_move = Some(move_);
            }
        }

        (best_move, best_score)
    }
}

impl Player for MinimaxPlayer {
    fn search(&mut self, position: &mut Position) -> SearchResult {
        self.nodes = 0;

        let stalemate = -STALEMATE_SCORE * position.side.sign();
        let (best_move, score) = match position.side {
            Side::White => self.maximize(position, self.max_depth, stalemate),
            Side::Black => self.minimize(position, self.max_depth, stalemate),
        };

        self.last_score = score;

        debug!(
            depth = self.max_depth,
            nodes = self.nodes,
            score,
            best_move = ?best_move.map(|m| m.to_uci_string()),
            "minimax search complete"
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            depth: self.max_depth,
        }
    }

    fn set_depth(&mut self, depth: u16) {
        self.max_depth = depth;
    }

    fn name(&self) -> &str {
        "minimax"
    }
}
