//! Synchronous generation stepping and the simulation controller

use super::{CellState, Family, Grid, Rule};
use crate::error::{GridError, SimulationError};
use log::{debug, info};
use std::collections::BTreeMap;

/// Advance `grid` by one generation under `rule`.
///
/// Every next state is computed from the current grid into a scratch
/// buffer, which then replaces the grid's cells in one swap. No cell ever
/// sees a neighbour's next state.
pub fn advance(grid: &mut Grid, rule: &Rule) {
    let mut next = next_generation(grid, rule);
    grid.commit(&mut next);
}

/// Next generation of `grid` as a row-major buffer, leaving `grid` untouched
pub fn next_generation(grid: &Grid, rule: &Rule) -> Vec<CellState> {
    let mut next = Vec::with_capacity(grid.cells().len());
    for y in 0..grid.height() as isize {
        for x in 0..grid.width() as isize {
            next.push(rule.next_state(grid, x, y));
        }
    }
    next
}

/// Count of cells per state
pub type Census = BTreeMap<String, usize>;

/// A grid paired with the rule that drives it.
///
/// All mutation goes through `&mut self`, so a step and a cell edit can
/// never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    grid: Grid,
    rule: Rule,
    generation: u64,
    brush: CellState,
}

impl Simulation {
    /// Empty `width`x`height` grid filled with the rule's default state
    pub fn new(width: usize, height: usize, rule: Rule) -> Result<Self, GridError> {
        let grid = Grid::new(width, height, rule.default_state())?;
        Ok(Self::from_matching(grid, rule))
    }

    /// Pair an existing grid with a rule of the same family
    pub fn with_grid(grid: Grid, rule: Rule) -> Result<Self, SimulationError> {
        let expected = rule.family();
        if grid.family() != expected {
            return Err(SimulationError::FamilyMismatch {
                state: grid.default_state(),
                expected,
            });
        }
        Ok(Self::from_matching(grid, rule))
    }

    /// Caller guarantees `grid` belongs to `rule`'s family
    pub(crate) fn from_matching(grid: Grid, rule: Rule) -> Self {
        let brush = default_brush(rule.family());
        Self {
            grid,
            rule,
            generation: 0,
            brush,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut Rule {
        &mut self.rule
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap the rule. Changing family resets the grid to the new family's
    /// default state, keeping its dimensions.
    pub fn set_rule(&mut self, rule: Rule) {
        if rule.family() != self.rule.family() {
            info!(
                "Switching automaton from {} to {}, grid reset",
                self.rule.type_tag(),
                rule.type_tag()
            );
            self.grid = blank_like(&self.grid, &rule);
            self.brush = default_brush(rule.family());
            self.generation = 0;
        }
        self.rule = rule;
    }

    /// Advance one generation
    pub fn step(&mut self) {
        advance(&mut self.grid, &self.rule);
        self.generation += 1;
        debug!("Advanced to generation {}", self.generation);
    }

    /// Advance `generations` generations
    pub fn step_n(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Overwrite (x, y) with `state`; out-of-bounds coordinates are ignored
    pub fn paint(&mut self, x: isize, y: isize, state: CellState) -> Result<(), SimulationError> {
        self.check_family(state)?;
        self.grid.set(x, y, state);
        Ok(())
    }

    /// Flip a Game of Life cell between Dead and Alive
    pub fn toggle(&mut self, x: isize, y: isize) -> Result<(), SimulationError> {
        let next = match self.grid.get(x, y) {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
            _ => return Err(SimulationError::ToggleUnsupported),
        };
        self.grid.set(x, y, next);
        Ok(())
    }

    /// Click interaction: toggles Game of Life cells, paints the brush state
    /// on Wireworld grids
    pub fn click(&mut self, x: isize, y: isize) -> Result<(), SimulationError> {
        match self.rule.family() {
            Family::GameOfLife => self.toggle(x, y),
            Family::Wireworld => self.paint(x, y, self.brush),
        }
    }

    pub fn brush(&self) -> CellState {
        self.brush
    }

    pub fn set_brush(&mut self, state: CellState) -> Result<(), SimulationError> {
        self.check_family(state)?;
        self.brush = state;
        Ok(())
    }

    /// Replace the grid with an empty one of the given size
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        self.grid.resize(width, height)?;
        self.generation = 0;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    /// Number of cells in each state of the active family
    pub fn census(&self) -> Census {
        self.rule
            .family()
            .states()
            .iter()
            .map(|&state| (state.to_string(), self.grid.count(state)))
            .collect()
    }

    fn check_family(&self, state: CellState) -> Result<(), SimulationError> {
        let expected = self.rule.family();
        if state.family() != expected {
            return Err(SimulationError::FamilyMismatch { state, expected });
        }
        Ok(())
    }
}

fn blank_like(grid: &Grid, rule: &Rule) -> Grid {
    let mut blank = grid.clone();
    blank.refill(rule.default_state());
    blank
}

fn default_brush(family: Family) -> CellState {
    match family {
        Family::GameOfLife => CellState::Alive,
        Family::Wireworld => CellState::Conductor,
    }
}
