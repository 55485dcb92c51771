//! Async owner of one game.
//!
//! Human moves arrive through [`GameController::apply_move`]. When the next
//! player is a bot the state is paused and a single tokio task plays the bot
//! turn after the presentation delay, so a human move can never interleave
//! with a bot move. `reset` and `reconfigure` cancel that task first.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::bot_controller::{BotInput, calculate_minimax_move, calculate_move};
use crate::config::Validate;
use crate::error::GameError;
use crate::game_state::{GameState, MoveOutcome};
use crate::log;
use crate::player::Player;
use crate::session_rng::SessionRng;
use crate::settings::{BotStrategy, GameSettings, validate_player_name};
use crate::types::{BoardValues, GameStatus, Position, WinningLine};

pub struct GameController {
    state: Arc<Mutex<GameState>>,
    settings: GameSettings,
    rng: Arc<Mutex<SessionRng>>,
    bot_turn: Option<JoinHandle<Result<(), GameError>>>,
    changed: Arc<watch::Sender<u64>>,
}

impl GameController {
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        Self::with_rng(settings, SessionRng::from_random())
    }

    pub fn with_rng(settings: GameSettings, rng: SessionRng) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;

        log!(
            "New game: vs_computer={}, bot={:?}, seed={}",
            settings.vs_computer,
            settings.bot_strategy,
            rng.seed()
        );

        let state = GameState::new(settings.create_players());
        let (changed, _) = watch::channel(0);

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            settings,
            rng: Arc::new(Mutex::new(rng)),
            bot_turn: None,
            changed: Arc::new(changed),
        })
    }

    pub async fn apply_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        let mut state = self.state.lock().await;
        let outcome = state.apply_move(row, col);
        if outcome == MoveOutcome::Ignored {
            return outcome;
        }

        let bot_next = state.is_bot_turn();
        if bot_next {
            state.pause();
        }
        drop(state);

        if bot_next {
            self.schedule_bot_turn();
        }
        notify_changed(&self.changed);
        outcome
    }

    pub async fn reset(&mut self) {
        self.cancel_bot_turn().await;

        // Seat 0 is always a human, so a fresh game never starts on a bot turn.
        self.state
            .lock()
            .await
            .reset(self.settings.create_players());

        log!("Game reset");
        notify_changed(&self.changed);
    }

    /// Replaces the settings and starts a new game with players derived from them.
    pub async fn reconfigure(&mut self, settings: GameSettings) -> Result<(), GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;
        log!(
            "Reconfigured: vs_computer={}, bot={:?}",
            settings.vs_computer,
            settings.bot_strategy
        );
        self.settings = settings;
        self.reset().await;
        Ok(())
    }

    /// Renames a human player; bots keep their name. The new name survives `reset`.
    pub async fn update_player_name(&mut self, index: usize, name: &str) -> Result<(), GameError> {
        let mut state = self.state.lock().await;
        if state.player(index)?.is_bot() {
            return Ok(());
        }

        validate_player_name(name).map_err(GameError::InvalidSettings)?;
        let name = name.trim();
        state.update_player_name(index, name)?;
        drop(state);

        match index {
            0 => self.settings.player_one_name = name.to_string(),
            _ => self.settings.player_two_name = name.to_string(),
        }
        notify_changed(&self.changed);
        Ok(())
    }

    /// Waits until the in-flight bot turn, if any, has been played.
    ///
    /// A bot that could not produce a move leaves the game paused and its error is
    /// returned here.
    pub async fn wait_for_bot(&mut self) -> Result<(), GameError> {
        let Some(handle) = self.bot_turn.take() else {
            return Ok(());
        };
        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                log!("Bot turn stopped: {}", e);
                Ok(())
            }
        }
    }

    /// Ticks after every state change, including bot moves made in the background.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub async fn snapshot(&self) -> GameState {
        self.state.lock().await.clone()
    }

    pub async fn board_values(&self) -> BoardValues {
        self.state.lock().await.board_values()
    }

    pub async fn active_player(&self) -> Player {
        self.state.lock().await.active_player().clone()
    }

    pub async fn is_game_over(&self) -> bool {
        self.state.lock().await.is_over()
    }

    pub async fn is_tie(&self) -> bool {
        self.state.lock().await.is_tie()
    }

    pub async fn winner(&self) -> Option<Player> {
        self.state.lock().await.winner().cloned()
    }

    pub async fn is_paused(&self) -> bool {
        self.state.lock().await.is_paused()
    }

    pub async fn status(&self) -> GameStatus {
        self.state.lock().await.status()
    }

    pub async fn winning_line(&self) -> Option<WinningLine> {
        self.state.lock().await.winning_line()
    }

    pub async fn last_move(&self) -> Option<Position> {
        self.state.lock().await.last_move()
    }

    fn schedule_bot_turn(&mut self) {
        let state = Arc::clone(&self.state);
        let rng = Arc::clone(&self.rng);
        let changed = Arc::clone(&self.changed);
        let delay = self.settings.bot_delay();

        self.bot_turn = Some(tokio::spawn(run_bot_turns(state, rng, changed, delay)));
    }

    async fn cancel_bot_turn(&mut self) {
        let Some(handle) = self.bot_turn.take() else {
            return;
        };
        if !handle.is_finished() {
            handle.abort();
            log!("Cancelled pending bot turn");
        }
        // Wait for the task to stop so it cannot touch the fresh game.
        match handle.await {
            Ok(Err(e)) => log!("Bot turn failed before reset: {}", e),
            Err(e) if !e.is_cancelled() => log!("Bot turn failed before reset: {}", e),
            _ => {}
        }
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        if let Some(handle) = self.bot_turn.take() {
            handle.abort();
        }
    }
}

fn notify_changed(changed: &watch::Sender<u64>) {
    changed.send_modify(|version| *version = version.wrapping_add(1));
}

async fn run_bot_turns(
    state: Arc<Mutex<GameState>>,
    rng: Arc<Mutex<SessionRng>>,
    changed: Arc<watch::Sender<u64>>,
    delay: Duration,
) -> Result<(), GameError> {
    loop {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (player, input) = {
            let mut state = state.lock().await;
            if !state.is_bot_turn() {
                state.resume();
                return Ok(());
            }
            (state.active_player().clone(), BotInput::from_game_state(&state))
        };

        // On failure the game stays paused so nobody can play the bot's mark.
        let position = select_bot_move(&player, input, &rng).await.inspect_err(|e| {
            log!("{} could not select a move: {}", player.name(), e);
        })?;

        let bot_again = {
            let mut state = state.lock().await;
            state.resume();
            let outcome = state.apply_move(position.row, position.col);
            log!("Bot {} chose {}: {:?}", player.name(), position, outcome);
            let bot_again = state.is_bot_turn();
            if bot_again {
                state.pause();
            }
            bot_again
        };

        notify_changed(&changed);
        if !bot_again {
            return Ok(());
        }
    }
}

async fn select_bot_move(
    player: &Player,
    input: BotInput,
    rng: &Mutex<SessionRng>,
) -> Result<Position, GameError> {
    let strategy = player.kind().bot_strategy().ok_or(GameError::NotABot)?;

    match strategy {
        BotStrategy::Random => {
            let mut rng = rng.lock().await;
            calculate_move(strategy, &input, &mut rng)
        }
        BotStrategy::Minimax => {
            match tokio::task::spawn_blocking(move || calculate_minimax_move(&input)).await {
                Ok(result) => result,
                Err(e) => match e.try_into_panic() {
                    Ok(panic) => std::panic::resume_unwind(panic),
                    Err(_) => Err(GameError::SearchStopped),
                },
            }
        }
    }
}
