use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of everything a renderer needs from a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
    pub state: GameState,
    pub is_game_over: bool,
    pub cells: Array2<Cell>,
}

impl Snapshot {
    pub fn from_board(board: &Board, state: GameState) -> Self {
        Self {
            rows: board.rows(),
            cols: board.cols(),
            mine_count: board.mine_count(),
            state,
            is_game_over: state.is_finished(),
            cells: board.cells().to_owned(),
        }
    }

    pub fn from_controller<G: MineGenerator>(controller: &GameController<G>) -> Self {
        Self::from_board(controller.board(), controller.state())
    }

    pub fn cell(&self, (row, col): Coord2) -> Option<&Cell> {
        self.cells.get([usize::from(row), usize::from(col)])
    }

    /// Player-visible state of every cell, row by row.
    pub fn cell_states(&self) -> Array2<CellState> {
        self.cells.map(Cell::state)
    }
}
