//! Game of Life and Wireworld cellular automata
//!
//! This library provides a bounded grid, the two transition rules and a
//! synchronous generation step, together with JSON persistence and YAML
//! configuration for the command line front end.

pub mod automaton;
pub mod config;
pub mod error;
pub mod utils;

pub use automaton::{advance, CellState, Grid, Rule, Simulation};
pub use config::Settings;
pub use error::{GridError, LoadError, RuleParseError, SimulationError};
