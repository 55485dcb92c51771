use crate::board::Board;
use crate::error::GameError;
use crate::log;
use crate::player::Player;
use crate::types::{BoardValues, GameStatus, Position, WinningLine};
use crate::win_detector::{check_win_with_line, evaluate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Paused, already over, off the board or occupied. State is untouched.
    Ignored,
    Placed,
    Won,
    Tied,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    active_player_index: usize,
    winner: Option<usize>,
    is_tie: bool,
    is_paused: bool,
    last_move: Option<Position>,
}

impl GameState {
    pub fn new(players: [Player; 2]) -> Self {
        Self {
            board: Board::new(),
            players,
            active_player_index: 0,
            winner: None,
            is_tie: false,
            is_paused: false,
            last_move: None,
        }
    }

    pub fn apply_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.is_paused || self.is_over() {
            return MoveOutcome::Ignored;
        }

        let position = Position::new(row, col);
        let mark = self.players[self.active_player_index].mark();
        if let Err(e) = self.board.place(position, mark) {
            log!("Ignoring move by {} at {}: {}", self.active_player().name(), position, e);
            return MoveOutcome::Ignored;
        }
        self.last_move = Some(position);

        let player = &mut self.players[self.active_player_index];
        log!("{} ({}) played {}", player.name(), mark, position);

        if evaluate(&self.board.snapshot(), mark) {
            player.mark_as_winner();
            self.winner = Some(self.active_player_index);
            log!("{} ({}) won", player.name(), mark);
            return MoveOutcome::Won;
        }

        if self.board.is_full() {
            self.is_tie = true;
            log!("Game tied");
            return MoveOutcome::Tied;
        }

        self.switch_turn();
        MoveOutcome::Placed
    }

    fn switch_turn(&mut self) {
        self.active_player_index = 1 - self.active_player_index;
    }

    /// Starts a fresh game with `players`, which replace the previous pair.
    pub fn reset(&mut self, players: [Player; 2]) {
        self.board.clear();
        self.players = players;
        for player in self.players.iter_mut() {
            player.reset_winner_flag();
        }
        self.active_player_index = 0;
        self.winner = None;
        self.is_tie = false;
        self.is_paused = false;
        self.last_move = None;
    }

    pub fn update_player_name(&mut self, index: usize, name: &str) -> Result<bool, GameError> {
        let player = self
            .players
            .get_mut(index)
            .ok_or(GameError::InvalidPlayerIndex(index))?;
        Ok(player.rename(name))
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.is_paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn board_values(&self) -> BoardValues {
        self.board.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Result<&Player, GameError> {
        self.players
            .get(index)
            .ok_or(GameError::InvalidPlayerIndex(index))
    }

    pub fn active_player_index(&self) -> usize {
        self.active_player_index
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active_player_index]
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    pub fn is_tie(&self) -> bool {
        self.is_tie
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_tie
    }

    /// True when the game is running and the player to move is a bot.
    pub fn is_bot_turn(&self) -> bool {
        !self.is_over() && self.active_player().is_bot()
    }

    pub fn status(&self) -> GameStatus {
        match (self.winner(), self.is_tie) {
            (Some(player), _) => GameStatus::Won(player.mark()),
            (None, true) => GameStatus::Tied,
            (None, false) => GameStatus::AwaitingMove,
        }
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winner?;
        check_win_with_line(&self.board.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::get_available_moves;
    use crate::session_rng::SessionRng;
    use crate::settings::{BotStrategy, GameSettings};
    use crate::types::{Cell, Mark};

    fn humans() -> [Player; 2] {
        GameSettings::default().create_players()
    }

    fn play(state: &mut GameState, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            assert_ne!(state.apply_move(row, col), MoveOutcome::Ignored, "({}, {})", row, col);
        }
    }

    fn assert_same_state(a: &GameState, b: &GameState) {
        assert_eq!(a.board_values(), b.board_values());
        assert_eq!(a.active_player_index(), b.active_player_index());
        assert_eq!(a.is_over(), b.is_over());
        assert_eq!(a.is_tie(), b.is_tie());
        assert_eq!(a.winner(), b.winner());
        assert_eq!(a.last_move(), b.last_move());
    }

    #[test]
    fn test_new_game_initial_state() {
        let state = GameState::new(humans());

        assert_eq!(state.active_player_index(), 0);
        assert!(!state.is_over());
        assert!(!state.is_tie());
        assert!(state.winner().is_none());
        assert!(!state.is_paused());
        assert_eq!(state.status(), GameStatus::AwaitingMove);
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = GameState::new(humans());

        assert_eq!(state.apply_move(0, 0), MoveOutcome::Placed);
        assert_eq!(state.active_player_index(), 1);
        assert_eq!(state.apply_move(1, 1), MoveOutcome::Placed);
        assert_eq!(state.active_player_index(), 0);

        let cells = state.board_values();
        assert_eq!(cells[0][0], Cell::Filled(Mark::X));
        assert_eq!(cells[1][1], Cell::Filled(Mark::O));
    }

    #[test]
    fn test_win_stops_the_game_before_opponent_cell() {
        let mut state = GameState::new(humans());
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1)]);

        assert_eq!(state.apply_move(0, 2), MoveOutcome::Won);

        assert!(state.is_over());
        assert!(!state.is_tie());
        let winner = state.winner().unwrap();
        assert_eq!(winner.mark(), Mark::X);
        assert!(winner.is_winner());
        assert!(!state.players()[1].is_winner());
        assert_eq!(state.board_values()[1][2], Cell::Empty);
        assert_eq!(state.status(), GameStatus::Won(Mark::X));
        assert_eq!(
            state.winning_line(),
            Some(WinningLine::new(Mark::X, Position::new(0, 0), Position::new(0, 2)))
        );
    }

    #[test]
    fn test_last_cell_without_line_is_a_tie() {
        // X O X / X O O / O X .  with X to play the last cell.
        let mut state = GameState::new(humans());
        play(
            &mut state,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)],
        );
        assert_eq!(state.board().marked_count(), 8);
        assert!(!state.is_over());

        assert_eq!(state.apply_move(2, 2), MoveOutcome::Tied);

        assert!(state.is_tie());
        assert!(state.is_over());
        assert!(state.winner().is_none());
        assert_eq!(state.status(), GameStatus::Tied);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_tie() {
        // X O X / O X O / O X .  X completes the diagonal on the ninth move.
        let mut state = GameState::new(humans());
        play(
            &mut state,
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 0)],
        );

        assert_eq!(state.apply_move(2, 2), MoveOutcome::Won);
        assert!(!state.is_tie());
    }

    #[test]
    fn test_ignored_moves_do_not_change_state() {
        let mut state = GameState::new(humans());
        play(&mut state, &[(0, 0), (1, 1)]);
        let before = state.clone();

        assert_eq!(state.apply_move(0, 0), MoveOutcome::Ignored);
        assert_eq!(state.apply_move(1, 1), MoveOutcome::Ignored);
        assert_eq!(state.apply_move(3, 0), MoveOutcome::Ignored);
        assert_eq!(state.apply_move(0, usize::MAX), MoveOutcome::Ignored);

        assert_same_state(&state, &before);
    }

    #[test]
    fn test_moves_ignored_while_paused() {
        let mut state = GameState::new(humans());
        state.pause();

        assert_eq!(state.apply_move(0, 0), MoveOutcome::Ignored);
        assert_eq!(state.board().marked_count(), 0);

        state.resume();
        assert_eq!(state.apply_move(0, 0), MoveOutcome::Placed);
    }

    #[test]
    fn test_moves_ignored_after_game_over() {
        let mut state = GameState::new(humans());
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let before = state.clone();

        assert_eq!(state.apply_move(2, 2), MoveOutcome::Ignored);

        assert_same_state(&state, &before);
    }

    #[test]
    fn test_reset_after_win_restores_initial_state() {
        let mut state = GameState::new(humans());
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        state.pause();

        state.reset(humans());

        assert!(!state.is_over());
        assert!(!state.is_tie());
        assert!(state.winner().is_none());
        assert_eq!(state.active_player_index(), 0);
        assert_eq!(state.board().marked_count(), 0);
        assert!(!state.is_paused());
        assert!(state.players().iter().all(|p| !p.is_winner()));
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_reset_replaces_players() {
        let mut state = GameState::new(humans());
        let settings = GameSettings {
            vs_computer: true,
            bot_strategy: BotStrategy::Minimax,
            ..GameSettings::default()
        };

        state.reset(settings.create_players());

        assert!(!state.players()[0].is_bot());
        assert!(state.players()[1].is_bot());
    }

    #[test]
    fn test_update_player_name() {
        let mut state = GameState::new(humans());

        assert_eq!(state.update_player_name(1, "Bea"), Ok(true));
        assert_eq!(state.players()[1].name(), "Bea");
        assert_eq!(
            state.update_player_name(2, "Cid"),
            Err(GameError::InvalidPlayerIndex(2))
        );
    }

    #[test]
    fn test_update_player_name_ignored_for_bot() {
        let settings = GameSettings {
            vs_computer: true,
            ..GameSettings::default()
        };
        let mut state = GameState::new(settings.create_players());

        assert_eq!(state.update_player_name(1, "Bea"), Ok(false));
        assert_eq!(state.players()[1].name(), "Player Two");
    }

    #[test]
    fn test_marks_never_exceed_moves() {
        let mut state = GameState::new(humans());
        let attempts = [
            (1, 1), (1, 1), (0, 0), (5, 5), (0, 0), (2, 2), (0, 2), (2, 0), (0, 1), (1, 0),
        ];
        let mut applied = 0;

        for (row, col) in attempts {
            let before = state.board_values();
            if state.apply_move(row, col) != MoveOutcome::Ignored {
                applied += 1;
            }
            let after = state.board_values();
            for r in 0..3 {
                for c in 0..3 {
                    if !before[r][c].is_empty() {
                        assert_eq!(before[r][c], after[r][c]);
                    }
                }
            }
            assert!(state.board().marked_count() <= applied);
        }
    }

    struct Tally {
        bot_wins: usize,
        ties: usize,
    }

    fn explore(state: &GameState, bot_index: usize, rng: &mut SessionRng, tally: &mut Tally) {
        if state.is_over() {
            match state.winner() {
                Some(winner) => {
                    assert!(
                        winner.is_bot(),
                        "bot lost:\n{:?}",
                        state.board_values()
                    );
                    tally.bot_wins += 1;
                }
                None => tally.ties += 1,
            }
            return;
        }

        if state.active_player_index() == bot_index {
            let position = state
                .active_player()
                .select_move(&state.board_values(), rng)
                .unwrap();
            let mut next = state.clone();
            assert_ne!(next.apply_move(position.row, position.col), MoveOutcome::Ignored);
            explore(&next, bot_index, rng, tally);
            return;
        }

        for position in get_available_moves(&state.board_values()) {
            let mut next = state.clone();
            next.apply_move(position.row, position.col);
            explore(&next, bot_index, rng, tally);
        }
    }

    #[test]
    fn test_minimax_bot_never_loses_moving_second() {
        let players = [
            Player::human("Opponent", Mark::X),
            Player::bot("Computer", Mark::O, BotStrategy::Minimax),
        ];
        let mut tally = Tally { bot_wins: 0, ties: 0 };

        explore(&GameState::new(players), 1, &mut SessionRng::new(0), &mut tally);

        assert!(tally.bot_wins > 0);
        assert!(tally.ties > 0);
    }

    #[test]
    fn test_minimax_bot_never_loses_moving_first() {
        let players = [
            Player::bot("Computer", Mark::X, BotStrategy::Minimax),
            Player::human("Opponent", Mark::O),
        ];
        let mut tally = Tally { bot_wins: 0, ties: 0 };

        explore(&GameState::new(players), 0, &mut SessionRng::new(0), &mut tally);

        assert!(tally.bot_wins > 0);
    }

    #[test]
    fn test_minimax_against_random_bot_never_loses() {
        let mut rng = SessionRng::new(99);
        for game in 0..50 {
            let mut players = [
                Player::bot("Random", Mark::X, BotStrategy::Random),
                Player::bot("Minimax", Mark::O, BotStrategy::Minimax),
            ];
            if game % 2 == 1 {
                players = [
                    Player::bot("Minimax", Mark::X, BotStrategy::Minimax),
                    Player::bot("Random", Mark::O, BotStrategy::Random),
                ];
            }
            let mut state = GameState::new(players);

            while !state.is_over() {
                let position = state
                    .active_player()
                    .select_move(&state.board_values(), &mut rng)
                    .unwrap();
                state.apply_move(position.row, position.col);
            }

            assert!(state.winner().is_none_or(|p| p.name() == "Minimax"));
        }
    }

    #[test]
    fn test_minimax_self_play_is_a_tie() {
        let mut state = GameState::new([
            Player::bot("First", Mark::X, BotStrategy::Minimax),
            Player::bot("Second", Mark::O, BotStrategy::Minimax),
        ]);
        let mut rng = SessionRng::new(0);

        while !state.is_over() {
            let position = state
                .active_player()
                .select_move(&state.board_values(), &mut rng)
                .unwrap();
            state.apply_move(position.row, position.col);
        }

        assert!(state.is_tie());
    }

    #[test]
    fn test_random_bot_over_many_calls_picks_empty_cells() {
        let mut state = GameState::new([
            Player::human("Ann", Mark::X),
            Player::bot("Random", Mark::O, BotStrategy::Random),
        ]);
        state.apply_move(1, 1);
        let mut rng = SessionRng::new(5);

        for _ in 0..1000 {
            let position = state
                .active_player()
                .select_move(&state.board_values(), &mut rng)
                .unwrap();
            assert_ne!(position, Position::new(1, 1));
            assert!(state.board().get(position).unwrap().is_empty());
        }
    }
}
