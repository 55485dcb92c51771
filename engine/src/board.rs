use crate::error::GameError;
use crate::types::{BoardValues, Cell, Mark, Position};

pub const BOARD_SIZE: usize = 3;

/// Empty cells in row-major order.
pub fn get_available_moves(cells: &BoardValues) -> Vec<Position> {
    let mut moves = Vec::new();
    for (row, line) in cells.iter().enumerate() {
        for (col, &cell) in line.iter().enumerate() {
            if cell.is_empty() {
                moves.push(Position::new(row, col));
            }
        }
    }
    moves
}

pub fn is_full(cells: &BoardValues) -> bool {
    cells.iter().all(|line| line.iter().all(|cell| !cell.is_empty()))
}

/// The live 3x3 grid. Cells only go from empty to marked through [`Board::place`];
/// [`Board::clear`] is the only way back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: BoardValues,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, text) in rows.iter().enumerate() {
            for (col, ch) in text.chars().enumerate() {
                board.cells[row][col] = match ch {
                    'X' => Cell::Filled(Mark::X),
                    'O' => Cell::Filled(Mark::O),
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    pub fn place(&mut self, position: Position, mark: Mark) -> Result<(), GameError> {
        if !position.is_on_board() {
            return Err(GameError::InvalidPosition {
                row: position.row,
                col: position.col,
            });
        }

        let cell = &mut self.cells[position.row][position.col];
        if !cell.is_empty() {
            return Err(GameError::CellOccupied {
                row: position.row,
                col: position.col,
            });
        }

        *cell = Cell::Filled(mark);
        Ok(())
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        if !position.is_on_board() {
            return None;
        }
        Some(self.cells[position.row][position.col])
    }

    pub fn is_full(&self) -> bool {
        is_full(&self.cells)
    }

    pub fn clear(&mut self) {
        self.cells = BoardValues::default();
    }

    /// Detached copy of the cells; writes to it never reach the board.
    pub fn snapshot(&self) -> BoardValues {
        self.cells
    }

    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|line| line.iter())
            .filter(|cell| !cell.is_empty())
            .count()
    }
}
