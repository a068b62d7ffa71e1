use tracing::{debug, info};

use crate::{
    constants::DEFAULT_MAX_DEPTH,
    position::Position,
    search::{MinimaxPlayer, Player, RandomPlayer, SearchResult},
    types::{ChessError, GameResult, Move, Side},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Minimax,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_depth: u16,
    pub strategy: Strategy,
    pub seed: Option<u64>, // Only used by the random strategy
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strategy: Strategy::Minimax,
            seed: None,
        }
    }
}

impl SearchSettings {
    fn build_player(&self) -> Box<dyn Player> {
        match self.strategy {
            Strategy::Minimax => Box::new(MinimaxPlayer::new(self.max_depth)),
            Strategy::Random => match self.seed {
                Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
                None => Box::new(RandomPlayer::new()),
            },
        }
    }
}

/// Saved game state, see [`Engine::snapshot`].
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    position: Position,
    history: Vec<Position>,
    computer_side: Option<Side>,
}

/// Game state plus the player that moves for the computer.
/// Keeps every earlier position so moves can be taken back.
pub struct Engine {
    pub position: Position,
    pub search_settings: SearchSettings,
    pub computer_side: Option<Side>,
    history: Vec<Position>,
    player: Box<dyn Player>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(SearchSettings::default())
    }
}

impl Engine {
    pub fn new(search_settings: SearchSettings) -> Self {
        let mut engine = Engine {
            position: Position::new(),
            search_settings,
            computer_side: None,
            history: Vec::new(),
            player: search_settings.build_player(),
        };

        engine.generate_moves();
        engine
    }

    pub fn new_game(&mut self) {
        self.position = Position::new();
        self.history.clear();
        self.computer_side = None;
        self.generate_moves();
    }

    /// Replaces the current game. The current game is kept if the string does not parse.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        self.position = Position::from_fen(fen)?;
        self.history.clear();
        self.generate_moves();
        Ok(())
    }

    /// Captures the game so a multi-step edit can be rolled back.
    /// The player and search settings are not part of it.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            position: self.position.clone(),
            history: self.history.clone(),
            computer_side: self.computer_side,
        }
    }

    pub fn restore(&mut self, snapshot: GameSnapshot) {
        self.position = snapshot.position;
        self.history = snapshot.history;
        self.computer_side = snapshot.computer_side;
        self.generate_moves();
    }

    pub fn generate_moves(&mut self) {
        self.position.generate_legal_moves();
    }

    pub fn legal_moves(&self) -> &[Move] {
        self.position.legal_moves()
    }

    pub fn is_legal(&self, move_: &Move) -> bool {
        self.position.is_legal(move_)
    }

    /// Applies `move_` if it is in the current legal-move list.
    /// The position is unchanged on error.
    pub fn make_move(&mut self, move_: Move) -> Result<(), ChessError> {
        self.generate_moves();

        if !self.position.is_legal(&move_) {
            return Err(ChessError::IllegalMove(move_.to_uci_string()));
        }

        let next = self.position.apply_move(&move_);
        self.history.push(std::mem::replace(&mut self.position, next));
        self.generate_moves();

        debug!(%move_, ply = self.history.len(), "move made");
        Ok(())
    }

    pub fn make_move_from_str(&mut self, move_str: &str) -> Result<Move, ChessError> {
        let move_ = Move::from_uci_string(move_str)?;
        self.make_move(move_)?;
        Ok(move_)
    }

    pub fn undo(&mut self) -> Result<(), ChessError> {
        let previous = self.history.pop().ok_or(ChessError::NothingToUndo)?;
        self.position = previous;
        self.generate_moves();
        Ok(())
    }

    /// Asks the configured player for a move without playing it.
    pub fn think(&mut self) -> Result<SearchResult, ChessError> {
        let result = self.player.search(&mut self.position);

        if result.best_move.is_none() {
            return Err(ChessError::NoLegalMoves);
        }

        info!(
            player = self.player.name(),
            depth = result.depth,
            nodes = result.nodes,
            score = result.score,
            "search finished"
        );

        Ok(result)
    }

    /// Like [`Engine::think`], but searches to `depth` this once.
    pub fn think_to_depth(&mut self, depth: u16) -> Result<SearchResult, ChessError> {
        self.player.set_depth(depth);
        let result = self.think();
        self.player.set_depth(self.search_settings.max_depth);
        result
    }

    /// Searches and plays the chosen move.
    pub fn play_computer_move(&mut self) -> Result<SearchResult, ChessError> {
        let result = self.think()?;

        if let Some(move_) = result.best_move {
            self.make_move(move_)?;
        }

        Ok(result)
    }

    pub fn game_result(&mut self) -> GameResult {
        self.position.check_game_result()
    }

    /// Plies played since the game was started or loaded.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn set_depth(&mut self, depth: u16) {
        self.search_settings.max_depth = depth;
        self.player.set_depth(depth);
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.search_settings.strategy = strategy;
        self.player = self.search_settings.build_player();
    }

    pub fn display_legal_moves(&self) {
        let mut moves: Vec<String> = self
            .position
            .legal_moves()
            .iter()
            .map(|m| m.to_uci_string())
            .collect();

        moves.sort();

        for (index, move_str) in moves.iter().enumerate() {
            print!("{} ", move_str);
            if (index + 1) % 8 == 0 {
                println!();
            }
        }
        println!();
    }
}
