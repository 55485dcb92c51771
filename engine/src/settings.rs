use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::player::Player;
use crate::types::Mark;

pub const MAX_NAME_LENGTH: usize = 24;
pub const MAX_BOT_DELAY_MS: u64 = 10_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotStrategy {
    Random,
    #[default]
    Minimax,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub vs_computer: bool,
    pub bot_strategy: BotStrategy,
    pub player_one_name: String,
    pub player_two_name: String,
    pub bot_delay_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            vs_computer: false,
            bot_strategy: BotStrategy::default(),
            player_one_name: "Player One".to_string(),
            player_two_name: "Player Two".to_string(),
            bot_delay_ms: 500,
        }
    }
}

impl GameSettings {
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Player one is always a human playing X; player two plays O.
    pub fn create_players(&self) -> [Player; 2] {
        let first = Player::human(self.player_one_name.clone(), Mark::X);
        let second = if self.vs_computer {
            Player::bot(self.player_two_name.clone(), Mark::O, self.bot_strategy)
        } else {
            Player::human(self.player_two_name.clone(), Mark::O)
        };
        [first, second]
    }
}

pub fn validate_player_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Player name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Player name '{}' is longer than {} characters",
            trimmed, MAX_NAME_LENGTH
        ));
    }
    Ok(())
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        validate_player_name(&self.player_one_name)?;
        validate_player_name(&self.player_two_name)?;
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "Bot delay must be at most {} ms, got {}",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        Ok(())
    }
}
