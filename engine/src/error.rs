use thiserror::Error;

/// Contract violations. Stale or invalid UI input is never reported through
/// this type; `GameState::apply_move` ignores it instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the board")]
    InvalidPosition { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already marked")]
    CellOccupied { row: usize, col: usize },

    #[error("no legal move: the board is full")]
    NoLegalMove,

    #[error("human players have no move selection strategy")]
    NotABot,

    #[error("player index {0} is out of range, expected 0 or 1")]
    InvalidPlayerIndex(usize),

    #[error("bot search was stopped before it finished")]
    SearchStopped,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
