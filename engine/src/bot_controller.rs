use crate::board::get_available_moves;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::search::best_move;
use crate::session_rng::SessionRng;
use crate::settings::BotStrategy;
use crate::types::{BoardValues, Mark, Position};

/// Everything a bot needs to pick a move, detached from the live game.
#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: BoardValues,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &GameState) -> Self {
        Self {
            board: state.board_values(),
            current_mark: state.active_player().mark(),
        }
    }
}

pub fn calculate_move(
    strategy: BotStrategy,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Position, GameError> {
    match strategy {
        BotStrategy::Random => calculate_random_move(input, rng),
        BotStrategy::Minimax => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Result<Position, GameError> {
    let available_moves = get_available_moves(&input.board);
    rng.choose(&available_moves)
        .copied()
        .ok_or(GameError::NoLegalMove)
}

pub fn calculate_minimax_move(input: &BotInput) -> Result<Position, GameError> {
    best_move(&input.board, input.current_mark).ok_or(GameError::NoLegalMove)
}
