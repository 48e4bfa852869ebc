//! Cellular automaton core: grid, rules and generation stepping

pub mod cell;
pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use cell::{CellState, Family};
pub use engine::{advance, next_generation, Census, Simulation};
pub use grid::Grid;
pub use io::{
    create_example_saves, example_glider, example_wireworld_loop, from_json, load_simulation,
    save_simulation, to_json, SaveData, SimulationState,
};
pub use rules::{parse_rule_set, GameOfLifeRule, Rule, RuleSet, WireworldRule};
