/// Search tests for the minimax and random players
///
/// 1. **Depth 0**: returns the static evaluation and some legal move
/// 2. **Side to move**: white maximizes, black minimizes the absolute score
/// 3. **Terminal scoring**: checkmate and stalemate sentinels
/// 4. **Statistics**: node counts of the full-width tree
/// 5. **Random player**: legal, reproducible with a seed
mod test_utils;

use shannon_chess::{
    constants::{MATE_SCORE, STALEMATE_SCORE, STARTING_FEN},
    position::Position,
    search::{MinimaxPlayer, Player, RandomPlayer, SearchResult, evaluate},
    types::{ChessError, Square},
};
use test_utils::*;

const SCHOLARS_MATE_IN_ONE: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
const FOOLS_MATE_IN_ONE: &str =
    "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

/// Helper to run a minimax search with fixed depth
fn search_position(fen: &str, depth: u16) -> SearchResult {
    let mut position = position_from_fen(fen);
    MinimaxPlayer::new(depth).search(&mut position)
}

mod depth_zero {
    use super::*;

    #[test]
    fn test_depth_zero_returns_static_evaluation() {
        for fen in [STARTING_FEN, "4k3/8/8/8/8/8/8/3QK3 w - - 0 1", FOOLS_MATE_IN_ONE] {
            let position = position_from_fen(fen);
            let result = search_position(fen, 0);

            assert_eq!(result.score, evaluate(&position), "{}", fen);
            assert_eq!(result.nodes, 1);
            assert_eq!(result.depth, 0);

            let best_move = result.best_move.expect("a move must be picked");
            assert!(position.is_legal(&best_move), "{} not legal in {}", best_move, fen);
        }
    }

    #[test]
    fn test_depth_zero_still_sees_checkmate() {
        let result = search_position(FOOLS_MATE, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
    }
}

mod side_to_move {
    use super::*;

    #[test]
    fn test_white_finds_mate_in_one() {
        for depth in [1, 2] {
            let result = search_position(SCHOLARS_MATE_IN_ONE, depth);

            assert_eq!(result.best_move, Some(create_test_move(Square::H5, Square::F7)));
            assert_eq!(result.score, MATE_SCORE);
        }
    }

    #[test]
    fn test_black_finds_mate_in_one() {
        // Black minimizes, so a mate for black scores the negative sentinel
        let result = search_position(FOOLS_MATE_IN_ONE, 1);

        assert_eq!(result.best_move, Some(create_test_move(Square::D8, Square::H4)));
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn test_black_minimizes_material() {
        // Only Qxd1 wins material for black
        let result = search_position("3qk3/8/8/8/8/8/8/3QK3 b - - 0 1", 1);

        assert_eq!(result.best_move, Some(create_test_move(Square::D8, Square::D1)));
        assert_eq!(result.score, -9);
    }

    #[test]
    fn test_white_maximizes_material() {
        let result = search_position("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1", 1);

        assert_eq!(result.best_move, Some(create_test_move(Square::D1, Square::D8)));
        assert_eq!(result.score, 9);
    }
}

mod terminal_scores {
    use super::*;

    #[test]
    fn test_checkmated_root_has_no_move() {
        let result = search_position(FOOLS_MATE, 3);

        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_stalemate_is_scored_against_the_searching_side() {
        let white_stalemated = search_position("K7/2q5/1k6/8/8/8/8/8 w - - 0 1", 2);
        assert_eq!(white_stalemated.best_move, None);
        assert_eq!(white_stalemated.score, -STALEMATE_SCORE);

        let black_stalemated = search_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2);
        assert_eq!(black_stalemated.best_move, None);
        assert_eq!(black_stalemated.score, STALEMATE_SCORE);
    }

    #[test]
    fn test_searching_side_avoids_stalemating_the_opponent() {
        // Qf7 would stalemate; every other move keeps the queen
        let result = search_position("7k/8/8/8/8/8/8/K4Q2 w - - 0 1", 1);

        assert_ne!(result.best_move, Some(create_test_move(Square::F1, Square::F7)));
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_choose_move_reports_no_legal_moves() {
        let mut position = position_from_fen(FOOLS_MATE);

        let minimax = MinimaxPlayer::new(2).choose_move(&mut position);
        assert_eq!(minimax, Err(ChessError::NoLegalMoves));

        let random = RandomPlayer::with_seed(1).choose_move(&mut position);
        assert_eq!(random, Err(ChessError::NoLegalMoves));
    }
}

mod statistics {
    use super::*;

    #[test]
    fn test_node_count_is_full_width() {
        // 1 root + 20 + 400
        assert_eq!(search_position(STARTING_FEN, 2).nodes, 421);
        // + 8902 at the third ply
        assert_eq!(search_position(STARTING_FEN, 3).nodes, 9_323);
    }

    #[test]
    fn test_last_score_and_nodes_are_kept() {
        let mut position = position_from_fen(STARTING_FEN);
        let mut player = MinimaxPlayer::new(1);

        let result = player.search(&mut position);

        assert_eq!(player.nodes, result.nodes);
        assert_eq!(player.last_score, result.score);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_search_leaves_position_unchanged() {
        let mut position = position_from_fen(SCHOLARS_MATE_IN_ONE);
        let before = position.clone();

        MinimaxPlayer::new(2).search(&mut position);

        assert_eq!(position, before);
        assert_eq!(position.legal_moves(), before.legal_moves());
    }
}

mod random_player {
    use super::*;

    #[test]
    fn test_random_move_is_legal() {
        let mut position = Position::new();
        let mut player = RandomPlayer::new();

        for _ in 0..20 {
            let move_ = player.choose_move(&mut position).unwrap();
            assert!(position.is_legal(&move_));
        }
    }

    #[test]
    fn test_seeded_players_agree() {
        let mut first = RandomPlayer::with_seed(42);
        let mut second = RandomPlayer::with_seed(42);

        let mut a = Position::new();
        let mut b = Position::new();

        for _ in 0..30 {
            let (Ok(move_a), Ok(move_b)) = (first.choose_move(&mut a), second.choose_move(&mut b))
            else {
                break;
            };

            assert_eq!(move_a, move_b);
            a = a.apply_move(&move_a);
            b = b.apply_move(&move_b);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_player_names() {
        assert_eq!(RandomPlayer::default().name(), "random");
        assert_eq!(MinimaxPlayer::new(1).name(), "minimax");
    }
}
