use std::io::{self, Write};
use std::time::Instant;

use rand::Rng;
use shannon_chess::{
    config::EngineConfig,
    constants::{BENCHMARK_MAX_PLY, BENCHMARK_SEED},
    engine::{Engine, SearchSettings, Strategy},
    position::Position,
    search::{MinimaxPlayer, Player, RandomPlayer},
    types::{GameResult, Side},
};
use tracing::warn;

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let len = s.len();

    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

/// Reads one trimmed line. None on end of input.
fn read_line() -> Option<String> {
    let mut input = String::new();

    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

struct CLI {
    engine: Engine,
    display_enabled: bool,
    flip: bool,
}

impl CLI {
    fn new(settings: SearchSettings) -> Self {
        Self {
            engine: Engine::new(settings),
            display_enabled: true,
            flip: false,
        }
    }

    fn show_help(&self) {
        println!("\n======================= INFORMATION ======================");
        println!("h or help - Displays help on the commands");
        println!("d or dd   - Displays board and toggles display setting");
        println!("moves     - Displays of list of possible moves");
        println!("fen       - Displays a FEN string for the current position");
        println!("f         - Flips the board");
        println!("q or quit - Quits the program");
        println!("================= CONTROLLING THE ENGINE =================");
        println!("go        - Choose a side and play against the computer");
        println!("new       - Starts a new game");
        println!("p or play - The computer plays a move");
        println!("off       - Turns the computer player off");
        println!("undo      - Takes back the last move");
        println!("===================== CONFIGURATION ======================");
        println!("fen <FEN>  - Loads a FEN string");
        println!("sd <depth> - Sets the minimax search depth");
        println!("minimax    - Computer uses the minimax player");
        println!("random     - Computer plays random legal moves");
        println!("========================= MOVES ==========================");
        println!("e2e4      - Coordinate moves; promotions append the piece");
        println!("            letter in the mover's case (e7e8Q, e2e1q)");
    }

    fn display_board(&self) {
        if self.display_enabled {
            self.engine.position.display_board(self.flip);
        }
    }

    /// Prints the score line and starts a new game if this one is over.
    fn print_result(&mut self, result: GameResult) {
        let message = match result {
            GameResult::InProgress => return,
            GameResult::Checkmate(Side::White) => "1-0 {White mates}",
            GameResult::Checkmate(Side::Black) => "0-1 {Black mates}",
            GameResult::Stalemate => "1/2-1/2 {Stalemate}",
            GameResult::DrawByFiftyMoveRule => "1/2-1/2 {Draw by fifty move rule}",
        };

        self.display_board();
        println!("\nGAME OVER");
        println!("{}", message);

        self.engine.new_game();
    }

    fn run_main_loop(&mut self) {
        self.display_board();

        loop {
            println!("\n-------------------------------");
            println!(
                "*   Ply: {} | To move: {}   *",
                self.engine.ply(),
                self.engine.position.side
            );
            println!("-------------------------------");

            // Computer's turn
            if self.engine.computer_side == Some(self.engine.position.side) {
                println!("\nComputer is thinking...");

                if !self.make_computer_move() {
                    println!("(No legal moves)");
                    self.engine.computer_side = None;
                }

                let game_result = self.engine.game_result();
                self.print_result(game_result);
                self.display_board();

                continue;
            }

            prompt("\nMove OR command > ");

            let Some(input) = read_line() else {
                return;
            };

            // COMMANDS WITHOUT PARAMETERS
            match input.to_lowercase().as_str() {
                "" => continue,
                "d" => {
                    self.engine.position.display_board(self.flip);
                    continue;
                }
                "dd" => {
                    self.display_enabled = !self.display_enabled;

                    if self.display_enabled {
                        println!("\nBoard display enabled");
                        self.display_board();
                    } else {
                        println!("\nBoard display disabled");
                    }
                    continue;
                }
                "f" => {
                    self.flip = !self.flip;
                    self.display_board();
                    continue;
                }
                "go" => {
                    self.handle_go_command();
                    continue;
                }
                "h" | "help" => {
                    self.show_help();
                    continue;
                }
                "fen" => {
                    println!("\n{}", self.engine.position.to_fen());
                    continue;
                }
                "moves" => {
                    println!("\nLegal moves:");
                    self.engine.display_legal_moves();
                    continue;
                }
                "new" => {
                    self.engine.new_game();
                    self.display_board();
                    continue;
                }
                "p" | "play" => {
                    self.engine.computer_side = Some(self.engine.position.side);
                    continue;
                }
                "off" => {
                    self.engine.computer_side = None;
                    continue;
                }
                "minimax" => {
                    self.engine.set_strategy(Strategy::Minimax);
                    println!("\nComputer uses minimax");
                    continue;
                }
                "random" => {
                    self.engine.set_strategy(Strategy::Random);
                    println!("\nComputer plays random moves");
                    continue;
                }
                "q" | "quit" => {
                    println!("\nProgram exiting");
                    break;
                }
                "undo" => {
                    match self.engine.undo() {
                        Ok(()) => {
                            self.engine.computer_side = None;
                            self.display_board();
                        }
                        Err(e) => println!("\n{}", e),
                    }
                    continue;
                }
                _ => {}
            }

            // COMMANDS WITH PARAMETERS
            if let Some(fen_str) = input.strip_prefix("fen ") {
                match self.engine.load_fen(fen_str.trim()) {
                    Ok(()) => {
                        self.display_board();
                        println!("FEN loaded successfully");
                    }
                    Err(e) => println!("Error loading FEN: {}", e),
                }
                continue;
            }

            if let Some(depth_str) = input.strip_prefix("sd ") {
                match depth_str.trim().parse::<u16>() {
                    Ok(depth) => {
                        self.engine.set_depth(depth);
                        println!("\nSearch depth set to {}", depth);
                    }
                    Err(_) => println!("\nINVALID DEPTH!"),
                }
                continue;
            }

            // Anything else is a move
            match self.engine.make_move_from_str(&input.replace(' ', "")) {
                Ok(_) => {
                    let game_result = self.engine.game_result();
                    self.print_result(game_result);
                    self.display_board();
                }
                Err(e) => {
                    warn!(input = %input, error = %e, "rejected move");
                    println!("\n{}", e);
                }
            }
        }
    }

    fn handle_go_command(&mut self) {
        println!("\nChoose your side:");
        println!("1. White");
        println!("2. Black");
        println!("3. Random");
        prompt("\nEnter choice (1-3) > ");

        let Some(choice) = read_line() else {
            return;
        };

        println!();

        let player_side = match choice.as_str() {
            "1" => Side::White,
            "2" => Side::Black,
            "3" => {
                let side = match rand::thread_rng().gen_bool(0.5) {
                    true => Side::White,
                    false => Side::Black,
                };
                println!("You are playing as {}", side);
                side
            }
            _ => {
                println!("Invalid choice. Defaulting to White.");
                Side::White
            }
        };

        self.engine.computer_side = Some(player_side.opponent());
    }

    fn make_computer_move(&mut self) -> bool {
        let start = Instant::now();

        let result = match self.engine.play_computer_move() {
            Ok(result) => result,
            Err(_) => return false,
        };

        let elapsed = start.elapsed();

        let Some(best_move) = result.best_move else {
            return false;
        };

        let ms_per_node = match result.nodes {
            0 => 0.0,
            nodes => elapsed.as_secs_f64() * 1000.0 / nodes as f64,
        };

        println!("\n┌─────────────── SEARCH STATISTICS ───────────────┐");
        println!(
            "│ Time:   {:>10} ms  │  Depth:   {:>4}           │",
            format_with_commas(elapsed.as_millis() as u64),
            result.depth
        );
        println!(
            "│ Nodes:  {:>13}  │  ms/node: {:>10.5}     │",
            format_with_commas(result.nodes),
            ms_per_node
        );
        println!(
            "│ Score:  {:>13}  │                            │",
            result.score
        );
        println!("└─────────────────────────────────────────────────┘");

        println!("\nComputer plays: \x1b[32m{}\x1b[0m", best_move);

        true
    }
}

/// Self-play of `games` games from the start, each capped at `BENCHMARK_MAX_PLY` plies.
fn run_benchmark(config: &EngineConfig) {
    let mut player: Box<dyn Player> = match config.strategy {
        Strategy::Minimax => Box::new(MinimaxPlayer::new(config.benchmark_depth)),
        Strategy::Random => Box::new(RandomPlayer::with_seed(
            config.seed.unwrap_or(BENCHMARK_SEED),
        )),
    };

    println!(
        "Benchmark: {} games, {} player, depth {}",
        config.benchmark_games,
        player.name(),
        config.benchmark_depth
    );

    let start = Instant::now();
    let mut total_nodes: u64 = 0;
    let mut total_plies: usize = 0;

    for _ in 0..config.benchmark_games {
        let mut position = Position::new();

        for _ in 0..BENCHMARK_MAX_PLY {
            let result = player.search(&mut position);
            total_nodes += result.nodes;

            let Some(best_move) = result.best_move else {
                break;
            };

            position = position.apply_move(&best_move);
            total_plies += 1;
        }
    }

    let elapsed = start.elapsed();

    println!("time={:.3}", elapsed.as_secs_f64());
    println!("plies={}", format_with_commas(total_plies as u64));
    println!("nodes={}", format_with_commas(total_nodes));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shannon_chess=info".into()),
        )
        .init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            EngineConfig::default()
        }
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-B" => {
                run_benchmark(&config);
                return;
            }
            other => eprintln!("Unknown option {}", other),
        }
    }

    println!("\n==============================");
    println!("|       Shannon Chess        |");
    println!("==============================\n");
    println!("Version {}", env!("CARGO_PKG_VERSION"));
    println!("\n\"h or help\" displays a list of commands\n");

    let mut cli = CLI::new(config.search_settings());
    cli.run_main_loop();
}
