use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mine layout for a board of the requested configuration.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}

/// How a random generator picks mine positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Draw random cells, redrawing whenever the cell already holds a mine.
    #[default]
    Rejection,
    /// Sample distinct cells from the flat index space; bounded work at any density.
    Shuffle,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "rejection" => Ok(Self::Rejection),
            "shuffle" => Ok(Self::Shuffle),
            other => Err(format!(
                "unknown placement {other:?}, expected \"rejection\" or \"shuffle\""
            )),
        }
    }
}
