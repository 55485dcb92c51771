//! Exhaustive minimax for the perfect-play bot.
//!
//! Scores are taken from the bot's point of view: a line for the bot at ply
//! `depth` is worth `10 - depth`, a line for the opponent `-(10 - depth)`, a
//! full board `0`. Earlier wins and later losses therefore score higher. The
//! search always runs on a detached [`BoardValues`] copy.

use crate::board::{get_available_moves, is_full};
use crate::types::{BoardValues, Cell, Mark, Position};
use crate::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

pub fn minimax(cells: &mut BoardValues, depth: i32, maximizing: bool, bot_mark: Mark) -> i32 {
    let opponent_mark = bot_mark.opponent();

    if evaluate(cells, bot_mark) {
        return WIN_SCORE - depth;
    }
    if evaluate(cells, opponent_mark) {
        return -(WIN_SCORE - depth);
    }
    if is_full(cells) {
        return 0;
    }

    let ply_mark = if maximizing { bot_mark } else { opponent_mark };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in get_available_moves(cells) {
        cells[position.row][position.col] = Cell::Filled(ply_mark);
        let score = minimax(cells, depth + 1, !maximizing, bot_mark);
        cells[position.row][position.col] = Cell::Empty;

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

/// Best cell for `bot_mark`; ties go to the first cell in row-major order.
/// Returns `None` only when the board has no empty cell.
pub fn best_move(cells: &BoardValues, bot_mark: Mark) -> Option<Position> {
    let mut board = *cells;
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for position in get_available_moves(cells) {
        board[position.row][position.col] = Cell::Filled(bot_mark);
        let score = minimax(&mut board, 0, false, bot_mark);
        board[position.row][position.col] = Cell::Empty;

        if score > best_score {
            best_score = score;
            best_move = Some(position);
        }
    }

    best_move
}
