pub mod board;
pub mod bot_controller;
pub mod config;
pub mod controller;
pub mod error;
pub mod game_state;
pub mod logger;
pub mod player;
pub mod search;
pub mod session_rng;
pub mod settings;
pub mod types;
pub mod win_detector;

pub use board::{BOARD_SIZE, Board};
pub use bot_controller::{BotInput, calculate_move};
pub use controller::GameController;
pub use error::{ConfigError, GameError};
pub use game_state::{GameState, MoveOutcome};
pub use player::{Player, PlayerKind};
pub use session_rng::SessionRng;
pub use settings::{BotStrategy, GameSettings};
pub use types::{BoardValues, Cell, GameStatus, Mark, Position, WinningLine};
