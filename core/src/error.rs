use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration {rows}x{cols} with {mines} mines: {reason}")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        reason: &'static str,
    },
    #[error("Coordinates ({row}, {col}) out of bounds for a {rows}x{cols} board")]
    OutOfBounds {
        row: Coord,
        col: Coord,
        rows: Coord,
        cols: Coord,
    },
    #[error("Mine at ({row}, {col}) listed more than once")]
    DuplicateMine { row: Coord, col: Coord },
}

pub type Result<T> = core::result::Result<T, GameError>;
