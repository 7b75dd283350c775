use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// One grid position and everything the engine knows about it.
///
/// Only the board mutates cells; callers receive shared references or copies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    neighboring_mines: u8,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighboring_mines: 0,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mines among the up-to-8 adjacent cells; always 0 on mine cells.
    pub const fn neighboring_mines(&self) -> u8 {
        self.neighboring_mines
    }

    /// Player-visible classification used by renderers.
    pub const fn state(&self) -> CellState {
        match (self.is_revealed, self.is_mine, self.is_flagged) {
            (true, true, _) => CellState::Mine,
            (true, false, _) => CellState::Revealed(self.neighboring_mines),
            (false, _, true) => CellState::Flagged,
            (false, _, false) => CellState::Hidden,
        }
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.is_mine = is_mine;
        self.neighboring_mines = 0;
    }

    pub(crate) fn set_neighboring_mines(&mut self, count: u8) {
        self.neighboring_mines = count;
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.is_flagged = !self.is_flagged;
    }

    pub(crate) fn clear_marks(&mut self) {
        self.is_revealed = false;
        self.is_flagged = false;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_hidden_and_safe() {
        let cell = Cell::new(2, 5);

        assert_eq!(cell.coords(), (2, 5));
        assert!(!cell.is_mine());
        assert!(!cell.is_revealed());
        assert!(!cell.is_flagged());
        assert_eq!(cell.neighboring_mines(), 0);
        assert_eq!(cell.state(), CellState::Hidden);
    }

    #[test]
    fn state_follows_markers() {
        let mut cell = Cell::new(0, 0);
        cell.set_neighboring_mines(3);

        cell.toggle_flag();
        assert_eq!(cell.state(), CellState::Flagged);
        assert!(cell.state().is_unrevealed());

        cell.reveal();
        assert_eq!(cell.state(), CellState::Revealed(3));

        cell.clear_marks();
        assert_eq!(cell.state(), CellState::Hidden);
    }

    #[test]
    fn marking_a_mine_drops_its_count() {
        let mut cell = Cell::new(1, 1);
        cell.set_neighboring_mines(4);

        cell.set_mine(true);

        assert!(cell.is_mine());
        assert_eq!(cell.neighboring_mines(), 0);
    }
}
