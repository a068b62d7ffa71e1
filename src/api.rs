#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

use crate::engine::{Engine, SearchSettings, Strategy};
use crate::types::ChessError;

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub depth: Option<u16>,
    pub strategy: Option<String>, // "minimax" (default) or "random"
    pub seed: Option<u64>,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,        // Coordinate notation (e.g., e2e4, e7e8Q)
    pub score: i32,               // Material balance, positive favors white
    pub depth: u16,               // Search depth used
    pub nodes: u64,               // Total nodes searched
    pub legal_moves: Vec<String>, // Every legal move in the analyzed position
    pub in_check: bool,           // Whether the side to move is in check
    pub fen_after_move: String,   // FEN string after applying best move
}

/// Main entry point for API consumers
/// Analyzes a chess position and returns the best move
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse, ChessError> {
    let strategy = match request.strategy.as_deref() {
        None | Some("minimax") => Strategy::Minimax,
        Some("random") => Strategy::Random,
        Some(other) => {
            return Err(ChessError::InvalidConfig(format!(
                "unknown strategy {:?}",
                other
            )));
        }
    };

    let mut engine = Engine::new(SearchSettings {
        max_depth: request.depth.unwrap_or(SearchSettings::default().max_depth),
        strategy,
        seed: request.seed,
    });

    engine.load_fen(&request.fen)?;

    let legal_moves: Vec<String> = engine
        .legal_moves()
        .iter()
        .map(|m| m.to_uci_string())
        .collect();
    let in_check = engine.position.is_in_check();

    // Fails with NoLegalMoves on checkmate or stalemate
    let result = engine.think()?;

    let best_move = result.best_move.ok_or(ChessError::NoLegalMoves)?;
    let fen_after_move = engine.position.apply_move(&best_move).to_fen();

    Ok(AnalyzeResponse {
        best_move: best_move.to_uci_string(),
        score: result.score,
        depth: result.depth,
        nodes: result.nodes,
        legal_moves,
        in_check,
        fen_after_move,
    })
}

/// Simpler interface with just FEN and depth
pub fn get_best_move(fen: &str, depth: u16) -> Result<AnalyzeResponse, ChessError> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        depth: Some(depth),
        strategy: None,
        seed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_starting_position() {
        let request = AnalyzeRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            depth: Some(2),
            strategy: None,
            seed: None,
        };

        let response = analyze_position(request).unwrap();
        assert!(!response.best_move.is_empty());
        assert_eq!(response.depth, 2);
        assert_eq!(response.legal_moves.len(), 20);
        assert!(response.legal_moves.contains(&response.best_move));
        // Root plus 20 replies plus 400 leaves
        assert_eq!(response.nodes, 421);
    }

    #[test]
    fn test_invalid_fen() {
        let request = AnalyzeRequest {
            fen: "invalid fen string".to_string(),
            depth: Some(3),
            strategy: None,
            seed: None,
        };

        let result = analyze_position(request);
        assert!(matches!(result, Err(ChessError::InvalidFen(_))));
    }

    #[test]
    fn test_unknown_strategy() {
        let request = AnalyzeRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            depth: None,
            strategy: Some("alphabeta".to_string()),
            seed: None,
        };

        assert!(matches!(
            analyze_position(request),
            Err(ChessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_checkmated_position_has_no_move() {
        // Fool's mate, white to move and mated
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let result = get_best_move(fen, 2);
        assert!(matches!(result, Err(ChessError::NoLegalMoves)));
    }

    #[test]
    fn test_mate_in_one_is_found() {
        // Scholar's mate pattern: Qxf7 is mate
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let response = get_best_move(fen, 1).unwrap();
        assert_eq!(response.best_move, "h5f7");
        assert_eq!(response.score, 2000);
    }

    #[test]
    fn test_random_strategy_is_seeded() {
        let request = || AnalyzeRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            depth: None,
            strategy: Some("random".to_string()),
            seed: Some(7),
        };

        let first = analyze_position(request()).unwrap();
        let second = analyze_position(request()).unwrap();
        assert_eq!(first.best_move, second.best_move);
    }

    #[test]
    fn test_fen_after_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let response = get_best_move(fen, 1).unwrap();

        assert_ne!(response.fen_after_move, fen);
        assert!(response.fen_after_move.contains(" b KQkq "));
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_response_serializes_to_json() {
        let response = get_best_move("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 1).unwrap();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"best_move\""));
        assert!(json.contains("\"fen_after_move\""));
    }
}
