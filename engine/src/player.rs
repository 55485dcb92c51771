use crate::bot_controller::{BotInput, calculate_move};
use crate::error::GameError;
use crate::session_rng::SessionRng;
use crate::settings::BotStrategy;
use crate::types::{BoardValues, Mark, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    RandomBot,
    MinimaxBot,
}

impl PlayerKind {
    pub fn bot_strategy(&self) -> Option<BotStrategy> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::RandomBot => Some(BotStrategy::Random),
            PlayerKind::MinimaxBot => Some(BotStrategy::Minimax),
        }
    }
}

impl From<BotStrategy> for PlayerKind {
    fn from(strategy: BotStrategy) -> Self {
        match strategy {
            BotStrategy::Random => PlayerKind::RandomBot,
            BotStrategy::Minimax => PlayerKind::MinimaxBot,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    mark: Mark,
    is_winner: bool,
    kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, mark: Mark, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            mark,
            is_winner: false,
            kind,
        }
    }

    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, PlayerKind::Human)
    }

    pub fn bot(name: impl Into<String>, mark: Mark, strategy: BotStrategy) -> Self {
        Self::new(name, mark, strategy.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.kind != PlayerKind::Human
    }

    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    pub fn mark_as_winner(&mut self) {
        self.is_winner = true;
    }

    pub fn reset_winner_flag(&mut self) {
        self.is_winner = false;
    }

    /// Renames a human player. Bots keep their name; returns whether the rename happened.
    pub fn rename(&mut self, name: impl Into<String>) -> bool {
        if self.is_bot() {
            return false;
        }
        self.name = name.into();
        true
    }

    pub fn select_move(
        &self,
        board: &BoardValues,
        rng: &mut SessionRng,
    ) -> Result<Position, GameError> {
        let strategy = self.kind.bot_strategy().ok_or(GameError::NotABot)?;
        let input = BotInput {
            board: *board,
            current_mark: self.mark,
        };
        calculate_move(strategy, &input, rng)
    }
}
