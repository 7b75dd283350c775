//! Minesweeper engine: mine placement, neighbor counting, flood-fill reveal
//! and win/loss tracking, with no knowledge of how the board is displayed.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod error;
mod generator;
mod snapshot;
mod types;

/// Board dimensions, mine count and the placement strategy used when mines
/// are (re)generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub placement: Placement,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            cols,
            mines,
            placement: Placement::Rejection,
        }
    }

    /// Builds a configuration, rejecting empty boards and boards with no
    /// safe cell left.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if self.rows == 0 || self.cols == 0 {
            "board must have at least one row and one column"
        } else if self.mines >= self.total_cells() {
            "mine count must leave at least one safe cell"
        } else {
            return Ok(());
        };

        Err(GameError::InvalidConfiguration {
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
            reason,
        })
    }

    pub fn validate_coords(&self, (row, col): Coord2) -> Result<Coord2> {
        if row < self.rows && col < self.cols {
            Ok((row, col))
        } else {
            Err(GameError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Positions of every mine on a board, independent of any play state.
///
/// Deserializing goes through [`MineLayout::from_mine_mask`], so the stored
/// count always matches the mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutRepr")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineLayoutRepr {
    mine_mask: Array2<bool>,
    #[serde(default)]
    mine_count: Option<CellCount>,
}

impl TryFrom<MineLayoutRepr> for MineLayout {
    type Error = GameError;

    fn try_from(repr: MineLayoutRepr) -> Result<Self> {
        let layout = Self::from_mine_mask(repr.mine_mask)?;
        if let Some(stored) = repr.mine_count
            && stored != layout.mine_count
        {
            log::warn!(
                "Stored mine count {} disagrees with mask, using {}",
                stored,
                layout.mine_count
            );
        }
        Ok(layout)
    }
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count();

        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidConfiguration {
                rows: rows.try_into().unwrap_or(Coord::MAX),
                cols: cols.try_into().unwrap_or(Coord::MAX),
                mines: mines.try_into().unwrap_or(CellCount::MAX),
                reason: "mine mask does not fit the coordinate range",
            });
        }
        // rows * cols fits `CellCount` once both fit `Coord`
        let mine_count = mines as CellCount;

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let (rows, cols) = size;

        for &(row, col) in mine_coords {
            if row >= rows || col >= cols {
                return Err(GameError::OutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            let slot = &mut mine_mask[(row, col).to_nd_index()];
            if *slot {
                return Err(GameError::DuplicateMine { row, col });
            }
            *slot = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // Dimensions are checked against `Coord` on construction.
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of a single reveal request, as seen by the caller that made it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
