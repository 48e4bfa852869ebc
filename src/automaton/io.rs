//! JSON persistence for simulations

use super::{CellState, Family, GameOfLifeRule, Grid, Rule, RuleSet, Simulation};
use crate::error::{GridError, LoadError};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

const GAME_OF_LIFE_TAG: &str = "GAMEOFLIFE";
const WIREWORLD_TAG: &str = "WIREWORLD";

/// On-disk shape of a saved simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub width: usize,
    pub height: usize,
    #[serde(rename = "type")]
    pub automaton: String,
    #[serde(default)]
    pub cells: Option<Vec<Vec<CellState>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survival_rules: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_rules: Option<Vec<u32>>,
}

impl SaveData {
    /// Snapshot a grid and its rule
    pub fn capture(grid: &Grid, rule: &Rule) -> Self {
        let (survival_rules, birth_rules) = match rule.as_game_of_life() {
            Some(life) => (
                Some(life.survival_rules().iter().copied().collect()),
                Some(life.birth_rules().iter().copied().collect()),
            ),
            None => (None, None),
        };

        Self {
            width: grid.width(),
            height: grid.height(),
            automaton: rule.type_tag().to_string(),
            cells: Some(grid.rows()),
            survival_rules,
            birth_rules,
        }
    }

    /// Rebuild the grid and rule this document describes.
    ///
    /// Rows or columns missing from `cells` are left at the default state;
    /// extra rows or columns are an error.
    pub fn into_state(self) -> Result<SimulationState, LoadError> {
        let family = match self.automaton.as_str() {
            GAME_OF_LIFE_TAG => Family::GameOfLife,
            WIREWORLD_TAG => Family::Wireworld,
            other => return Err(LoadError::UnknownType(other.to_string())),
        };

        let mut grid = Grid::new(self.width, self.height, family.default_state())?;
        let rows = self.cells.unwrap_or_default();
        if rows.len() > self.height {
            return Err(LoadError::TooManyRows {
                declared: self.height,
                actual: rows.len(),
            });
        }

        let mut short = rows.len() < self.height;
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() > self.width {
                return Err(LoadError::TooManyColumns {
                    row: y,
                    declared: self.width,
                    actual: row.len(),
                });
            }
            short |= row.len() < self.width;
            for (x, state) in row.into_iter().enumerate() {
                if state.family() != family {
                    return Err(LoadError::ForeignCell {
                        x,
                        y,
                        state,
                        expected: family,
                    });
                }
                grid.set(x as isize, y as isize, state);
            }
        }
        if short {
            warn!(
                "Saved cells cover less than the declared {}x{} grid, remainder default-filled",
                self.width, self.height
            );
        }

        let rule = match family {
            Family::Wireworld => Rule::wireworld(),
            Family::GameOfLife => match (self.survival_rules, self.birth_rules) {
                (Some(survival), Some(birth)) => Rule::GameOfLife(GameOfLifeRule::new(
                    &survival.into_iter().collect::<RuleSet>(),
                    &birth.into_iter().collect::<RuleSet>(),
                )),
                (None, None) => Rule::game_of_life(),
                _ => return Err(LoadError::PartialRules),
            },
        };

        Ok(SimulationState { grid, rule })
    }
}

/// A loaded grid and rule, read-only until turned into a [`Simulation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    grid: Grid,
    rule: Rule,
}

impl SimulationState {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn into_parts(self) -> (Grid, Rule) {
        (self.grid, self.rule)
    }
}

impl From<SimulationState> for Simulation {
    /// Loading already rejects cells of the wrong family
    fn from(state: SimulationState) -> Self {
        Simulation::from_matching(state.grid, state.rule)
    }
}

impl Simulation {
    /// Replace grid and rule with a loaded state and restart the generation count
    pub fn restore(&mut self, state: SimulationState) {
        *self = state.into();
    }

    pub fn to_save_data(&self) -> SaveData {
        SaveData::capture(self.grid(), self.rule())
    }
}

/// Serialize a grid and rule to pretty-printed JSON
pub fn to_json(grid: &Grid, rule: &Rule) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SaveData::capture(grid, rule))
}

/// Parse a saved simulation from JSON text
pub fn from_json(json: &str) -> Result<SimulationState, LoadError> {
    let data: SaveData = serde_json::from_str(json)?;
    data.into_state()
}

/// Save a grid and rule to a JSON file
pub fn save_simulation<P: AsRef<Path>>(path: P, grid: &Grid, rule: &Rule) -> Result<()> {
    let path = path.as_ref();
    let content = to_json(grid, rule).context("Failed to serialize simulation")?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write simulation to file: {}", path.display()))?;

    info!(
        "Saved {}x{} {} simulation to {}",
        grid.width(),
        grid.height(),
        rule.type_tag(),
        path.display()
    );
    Ok(())
}

/// Load a simulation from a JSON file
pub fn load_simulation<P: AsRef<Path>>(path: P) -> Result<SimulationState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read simulation file: {}", path.display()))?;

    let state = from_json(&content)
        .with_context(|| format!("Failed to parse simulation from file: {}", path.display()))?;

    info!(
        "Loaded {}x{} {} simulation from {}",
        state.grid.width(),
        state.grid.height(),
        state.rule.type_tag(),
        path.display()
    );
    Ok(state)
}

/// Glider heading south-east on an 8x8 Game of Life grid
pub fn example_glider() -> Result<SimulationState, GridError> {
    let mut grid = Grid::new(8, 8, CellState::Dead)?;
    for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        grid.set(x, y, CellState::Alive);
    }
    Ok(SimulationState {
        grid,
        rule: Rule::game_of_life(),
    })
}

/// A single electron circling a rectangular Wireworld loop
pub fn example_wireworld_loop() -> Result<SimulationState, GridError> {
    let mut grid = Grid::new(7, 5, CellState::Empty)?;
    for x in 1..=5 {
        grid.set(x, 1, CellState::Conductor);
        grid.set(x, 3, CellState::Conductor);
    }
    grid.set(1, 2, CellState::Conductor);
    grid.set(5, 2, CellState::Conductor);
    grid.set(1, 1, CellState::Tail);
    grid.set(2, 1, CellState::Head);
    Ok(SimulationState {
        grid,
        rule: Rule::wireworld(),
    })
}

/// Write the example saves into `output_dir`
pub fn create_example_saves<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let glider = example_glider()?;
    save_simulation(dir.join("glider.json"), glider.grid(), glider.rule())
        .context("Failed to write glider.json")?;

    let wire = example_wireworld_loop()?;
    save_simulation(dir.join("wireworld_loop.json"), wire.grid(), wire.rule())
        .context("Failed to write wireworld_loop.json")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn custom_life() -> (Grid, Rule) {
        let mut grid = Grid::new(4, 3, CellState::Dead).unwrap();
        grid.set(0, 0, CellState::Alive);
        grid.set(3, 2, CellState::Alive);
        grid.set(1, 1, CellState::Alive);
        let mut rule = GameOfLifeRule::default();
        rule.set_rules_from_str("1,12", "36").unwrap();
        (grid, Rule::GameOfLife(rule))
    }

    #[test]
    fn test_round_trip_game_of_life() {
        let (grid, rule) = custom_life();
        let json = to_json(&grid, &rule).unwrap();
        let state = from_json(&json).unwrap();

        assert_eq!(state.grid(), &grid);
        assert_eq!(state.rule(), &rule);
    }

    #[test]
    fn test_round_trip_wireworld() {
        let wire = example_wireworld_loop().unwrap();
        let json = to_json(wire.grid(), wire.rule()).unwrap();
        assert!(!json.contains("survivalRules"));
        let state = from_json(&json).unwrap();
        assert_eq!(state, wire);
    }

    #[test]
    fn test_document_fields() {
        let (grid, rule) = custom_life();
        let value: serde_json::Value = serde_json::from_str(&to_json(&grid, &rule).unwrap()).unwrap();
        assert_eq!(value["width"], 4);
        assert_eq!(value["height"], 3);
        assert_eq!(value["type"], "GAMEOFLIFE");
        assert_eq!(value["cells"][0][0], "ALIVE");
        assert_eq!(value["cells"][0][1], "DEAD");
        assert_eq!(value["survivalRules"], serde_json::json!([1, 12]));
        assert_eq!(value["birthRules"], serde_json::json!([3, 6]));
    }

    #[test]
    fn test_short_cells_default_filled() {
        let json = r#"{"width": 3, "height": 2, "type": "WIREWORLD",
                       "cells": [["HEAD", "CONDUCTOR"]]}"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.grid().get(0, 0), CellState::Head);
        assert_eq!(state.grid().get(1, 0), CellState::Conductor);
        assert_eq!(state.grid().get(2, 0), CellState::Empty);
        assert_eq!(state.grid().get(0, 1), CellState::Empty);
    }

    #[test]
    fn test_missing_cells_and_rules() {
        let json = r#"{"width": 2, "height": 2, "type": "GAMEOFLIFE"}"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.grid().count(CellState::Dead), 4);
        assert_eq!(state.rule(), &Rule::game_of_life());

        let json = r#"{"width": 2, "height": 2, "type": "GAMEOFLIFE", "cells": null,
                       "survivalRules": null, "birthRules": null}"#;
        assert!(from_json(json).is_ok());
    }

    #[test]
    fn test_invalid_documents() {
        let oversized = r#"{"width": 1, "height": 1, "type": "GAMEOFLIFE",
                            "cells": [["DEAD"], ["DEAD"]]}"#;
        assert!(matches!(from_json(oversized), Err(LoadError::TooManyRows { declared: 1, actual: 2 })));

        let wide = r#"{"width": 1, "height": 1, "type": "GAMEOFLIFE", "cells": [["DEAD", "ALIVE"]]}"#;
        assert!(matches!(from_json(wide), Err(LoadError::TooManyColumns { .. })));

        let unknown = r#"{"width": 1, "height": 1, "type": "LANGTON"}"#;
        assert!(matches!(from_json(unknown), Err(LoadError::UnknownType(_))));

        let mixed = r#"{"width": 2, "height": 1, "type": "GAMEOFLIFE", "cells": [["DEAD", "HEAD"]]}"#;
        assert!(matches!(from_json(mixed), Err(LoadError::ForeignCell { x: 1, y: 0, .. })));

        let partial = r#"{"width": 1, "height": 1, "type": "GAMEOFLIFE", "survivalRules": [2]}"#;
        assert!(matches!(from_json(partial), Err(LoadError::PartialRules)));

        let huge = r#"{"width": 4294967296, "height": 4294967296, "type": "GAMEOFLIFE"}"#;
        assert!(matches!(from_json(huge), Err(LoadError::Grid(GridError::TooLarge { .. }))));

        let wrapping = r#"{"width": 4611686018427387904, "height": 4, "type": "WIREWORLD"}"#;
        assert!(matches!(from_json(wrapping), Err(LoadError::Grid(GridError::TooLarge { .. }))));

        let zero = r#"{"width": 0, "height": 3, "type": "WIREWORLD"}"#;
        assert!(matches!(from_json(zero), Err(LoadError::Grid(_))));

        let negative = r#"{"width": -2, "height": 3, "type": "WIREWORLD"}"#;
        assert!(matches!(from_json(negative), Err(LoadError::Json(_))));

        let missing = r#"{"height": 3, "type": "WIREWORLD"}"#;
        assert!(matches!(from_json(missing), Err(LoadError::Json(_))));

        let bad_token = r#"{"width": 1, "height": 1, "type": "WIREWORLD", "cells": [["SPARK"]]}"#;
        assert!(from_json(bad_token).is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/sim.json");
        let (grid, rule) = custom_life();

        save_simulation(&file_path, &grid, &rule).unwrap();
        let state = load_simulation(&file_path).unwrap();

        assert_eq!(state.grid(), &grid);
        assert_eq!(state.rule(), &rule);
        assert!(load_simulation(temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_restore_resets_simulation() {
        let (grid, rule) = custom_life();
        let json = to_json(&grid, &rule).unwrap();

        let mut sim = Simulation::new(10, 10, Rule::wireworld()).unwrap();
        sim.step();
        sim.restore(from_json(&json).unwrap());

        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid(), &grid);
        assert_eq!(sim.rule(), &rule);
        assert_eq!(sim.to_save_data(), SaveData::capture(&grid, &rule));
    }

    #[test]
    fn test_create_example_saves() {
        let temp_dir = tempdir().unwrap();
        create_example_saves(temp_dir.path()).unwrap();

        let glider = load_simulation(temp_dir.path().join("glider.json")).unwrap();
        assert_eq!(glider.grid().count(CellState::Alive), 5);

        let wire = load_simulation(temp_dir.path().join("wireworld_loop.json")).unwrap();
        assert_eq!(wire.rule(), &Rule::wireworld());
        assert_eq!(wire.grid().count(CellState::Head), 1);
    }
}
