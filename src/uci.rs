use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::{
    constants::MATE_SCORE,
    engine::Engine,
    types::{ChessError, ColoredPiece, Move, Side},
};

const ENGINE_NAME: &str = "Shannon";
const ENGINE_AUTHOR: &str = "the shannon-chess authors";

/// Runs the protocol until `quit` or end of input.
pub fn uci_loop<R: BufRead, W: Write>(
    engine: &mut Engine,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if !handle_command(engine, line, output)? {
            break;
        }

        output.flush()?;
    }

    Ok(())
}

/// Returns false when the loop should stop.
fn handle_command<W: Write>(
    engine: &mut Engine,
    line: &str,
    output: &mut W,
) -> io::Result<bool> {
    let command = line.split_whitespace().next().unwrap_or_default();

    match command {
        "uci" => {
            writeln!(output, "id name {}", ENGINE_NAME)?;
            writeln!(output, "id author {}", ENGINE_AUTHOR)?;
            writeln!(output, "uciok")?;
        }
        "isready" => {
            writeln!(output, "readyok")?;
        }
        "ucinewgame" => {
            engine.new_game();
        }
        "position" => {
            if let Err(e) = parse_position_command(engine, line) {
                warn!(command = line, error = %e, "rejected position command");
            }
        }
        "go" => {
            let search = match parse_go_command(line) {
                Some(depth) => engine.think_to_depth(depth),
                None => engine.think(),
            };

            let best_move = match search {
                Ok(result) => {
                    writeln!(
                        output,
                        "info depth {} score {} nodes {}",
                        result.depth,
                        format_score(result.score, result.depth, engine.position.side),
                        result.nodes
                    )?;
                    result
                        .best_move
                        .map(|m| m.to_uci_string().to_ascii_lowercase())
                }
                Err(_) => None,
            };

            writeln!(
                output,
                "bestmove {}",
                best_move.unwrap_or_else(|| "0000".to_string())
            )?;
        }
        "stop" => {}
        "quit" => {
            return Ok(false);
        }
        "d" | "display" => {
            write!(output, "{}", engine.position.board_string(false))?;
            writeln!(output, "{}", engine.position.to_fen())?;
        }
        _ => {
            // Unknown commands are ignored
        }
    }

    Ok(true)
}

/// Score from the point of view of the side to move. The search does not
/// track mate distance, so a mate is reported at the search horizon in moves.
fn format_score(score: i32, depth: u16, side: Side) -> String {
    let relative = score * side.sign();

    if relative.abs() == MATE_SCORE {
        let moves = ((i32::from(depth) + 1) / 2).max(1);
        format!("mate {}", moves * relative.signum())
    } else {
        format!("cp {}", relative * 100)
    }
}

/// Protocol move strings use lowercase promotion letters for both sides,
/// so the promoted piece takes the color of the side to move.
fn parse_protocol_move(engine: &Engine, move_str: &str) -> Result<Move, ChessError> {
    let mut move_ = Move::from_uci_string(move_str)?;

    if let Some(unit) = move_.promotion {
        move_.promotion = Some(ColoredPiece::new(engine.position.side, unit.piece));
    }

    Ok(move_)
}

/// Parse UCI position command
/// Examples:
///   position startpos
///   position startpos moves e2e4 e7e5
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 moves e2e4
///
/// On error the engine keeps the game it had before the command.
pub fn parse_position_command(engine: &mut Engine, command: &str) -> Result<(), ChessError> {
    let saved = engine.snapshot();
    let result = set_up_position(engine, command);

    if result.is_err() {
        engine.restore(saved);
    }

    result
}

fn set_up_position(engine: &mut Engine, command: &str) -> Result<(), ChessError> {
    let parts: Vec<&str> = command.split_whitespace().collect();

    let mut index = 1;

    match parts.get(index) {
        Some(&"startpos") => {
            engine.new_game();
            index += 1;
        }
        Some(&"fen") => {
            index += 1;

            let fen_parts: Vec<&str> = parts[index..]
                .iter()
                .take_while(|&&part| part != "moves")
                .take(6)
                .copied()
                .collect();
            index += fen_parts.len();

            engine.load_fen(&fen_parts.join(" "))?;
        }
        other => {
            return Err(ChessError::InvalidFen(format!(
                "expected startpos or fen, found {:?}",
                other
            )));
        }
    }

    if parts.get(index) == Some(&"moves") {
        for move_str in &parts[index + 1..] {
            let move_ = parse_protocol_move(engine, move_str)?;
            engine.make_move(move_)?;
        }
    }

    Ok(())
}

/// Parse UCI go command. Returns the requested depth for this search only;
/// time controls are ignored.
/// Examples:
///   go depth 3
///   go wtime 300000 btime 300000
pub fn parse_go_command(command: &str) -> Option<u16> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let mut depth = None;

    let mut i = 1; // Skip "go"
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                if let Some(d) = parts.get(i + 1).and_then(|d| d.parse::<u16>().ok()) {
                    depth = Some(d);
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    depth
}
