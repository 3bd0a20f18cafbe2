use thiserror::Error;

use crate::game::Cell;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell size must be greater than zero")]
    ZeroCellSize,

    #[error("Play area of {width}x{height} px holds no {cell_size} px cell")]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("Initial snake of length {length} at {head:?} does not fit a {columns}x{rows} grid")]
    SnakeDoesNotFit {
        head: Cell,
        length: usize,
        columns: i32,
        rows: i32,
    },

    #[error("No free cell left for food")]
    NoFreeCell,
}
