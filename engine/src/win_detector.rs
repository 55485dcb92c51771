use crate::board::is_full;
use crate::types::{BoardValues, Cell, Mark, Position, WinningLine};

type Line = [(usize, usize); 3];

const LINES: [Line; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn line_is(cells: &BoardValues, line: &Line, mark: Mark) -> bool {
    line.iter()
        .all(|&(row, col)| cells[row][col] == Cell::Filled(mark))
}

/// True when any row, column or diagonal is entirely `mark`.
pub fn evaluate(cells: &BoardValues, mark: Mark) -> bool {
    LINES.iter().any(|line| line_is(cells, line, mark))
}

pub fn check_win(cells: &BoardValues) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| evaluate(cells, mark))
}

pub fn check_win_with_line(cells: &BoardValues) -> Option<WinningLine> {
    for mark in [Mark::X, Mark::O] {
        if let Some(line) = LINES.iter().find(|line| line_is(cells, line, mark)) {
            let (start_row, start_col) = line[0];
            let (end_row, end_col) = line[2];
            return Some(WinningLine::new(
                mark,
                Position::new(start_row, start_col),
                Position::new(end_row, end_col),
            ));
        }
    }
    None
}

pub fn is_draw(cells: &BoardValues) -> bool {
    is_full(cells) && check_win(cells).is_none()
}
