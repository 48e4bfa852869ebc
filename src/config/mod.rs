//! Configuration management for the automaton simulator

pub mod settings;

pub use settings::{CliOverrides, OutputConfig, OutputFormat, RulesConfig, Settings, SimulationConfig};
