//! Error types for grid construction, rule configuration and persistence

use crate::automaton::{CellState, Family};

/// Errors raised when building or resizing a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("Grid of {width}x{height} exceeds the limit of {max_cells} cells")]
    TooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },
    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
    #[error("Cell ({x}, {y}) holds {state:?}, which does not belong to a {expected:?} grid")]
    ForeignState {
        x: usize,
        y: usize,
        state: CellState,
        expected: Family,
    },
}

/// Errors raised while parsing survival/birth rule text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    #[error("'{segment}' is not a valid neighbour count")]
    InvalidCount { segment: String },
    #[error("Rule text '{text}' contains separators but no counts")]
    NoCounts { text: String },
}

/// Errors raised by the simulation controller on cell edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("Cannot place {state:?} on a {expected:?} grid")]
    FamilyMismatch { state: CellState, expected: Family },
    #[error("Toggling is only defined for Game of Life grids")]
    ToggleUnsupported,
}

/// Errors raised while turning a saved document back into a simulation
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Malformed simulation document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown automaton type '{0}'")]
    UnknownType(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Cells array has {actual} rows, declared height is {declared}")]
    TooManyRows { declared: usize, actual: usize },
    #[error("Row {row} has {actual} cells, declared width is {declared}")]
    TooManyColumns { row: usize, declared: usize, actual: usize },
    #[error("Cell ({x}, {y}) holds {state:?}, which does not belong to a {expected:?} grid")]
    ForeignCell {
        x: usize,
        y: usize,
        state: CellState,
        expected: Family,
    },
    #[error("Game of Life document must carry both survivalRules and birthRules or neither")]
    PartialRules,
}
