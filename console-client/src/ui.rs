use tictactoe_engine::{BOARD_SIZE, GameState, GameStatus};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Move { row: usize, col: usize },
    Reset,
    Rename { index: usize, name: String },
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(first) = parts.next() else {
        return Err("Empty command".to_string());
    };

    match first {
        "reset" | "r" => Ok(Command::Reset),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "name" => {
            let index = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| "Usage: name <1|2> <new name>".to_string())?;
            let name = parts.collect::<Vec<_>>().join(" ");
            if index == 0 || name.is_empty() {
                return Err("Usage: name <1|2> <new name>".to_string());
            }
            Ok(Command::Rename {
                index: index - 1,
                name,
            })
        }
        _ => {
            let row = first.parse::<usize>().map_err(|_| format!("Unknown command '{}'", first))?;
            let col = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| "Usage: <row> <col>, both 1-3".to_string())?;
            if row == 0 || col == 0 {
                return Err("Rows and columns start at 1".to_string());
            }
            Ok(Command::Move {
                row: row - 1,
                col: col - 1,
            })
        }
    }
}

pub fn render(state: &GameState) -> String {
    let cells = state.board_values();
    let mut out = String::from("    1   2   3\n");
    for (row, line) in cells.iter().enumerate() {
        let rendered: Vec<String> = line.iter().map(|cell| cell.to_string()).collect();
        out.push_str(&format!("{}   {}\n", row + 1, rendered.join(" | ")));
        if row + 1 < BOARD_SIZE {
            out.push_str("   ---+---+---\n");
        }
    }

    let status = match state.status() {
        GameStatus::AwaitingMove if state.is_paused() => {
            format!("{} is thinking...", state.active_player().name())
        }
        GameStatus::AwaitingMove => {
            let player = state.active_player();
            format!("{}'s turn ({})", player.name(), player.mark())
        }
        GameStatus::Won(mark) => {
            let name = state.winner().map(|p| p.name()).unwrap_or_default();
            format!("{} ({}) wins! Type 'reset' to play again.", name, mark)
        }
        GameStatus::Tied => "It's a tie! Type 'reset' to play again.".to_string(),
    };
    out.push_str(&status);
    out
}

pub const HELP: &str = "Commands:\n  <row> <col>        place your mark, rows and columns are 1-3\n  reset              start a new game\n  name <1|2> <name>  rename a human player\n  quit               leave";
