//! Transition rules for Game of Life and Wireworld

use super::{CellState, Family, Grid};
use crate::error::RuleParseError;
use itertools::Itertools;
use log::debug;
use std::collections::BTreeSet;

/// A set of neighbour counts, e.g. the survival counts of `S23`
pub type RuleSet = BTreeSet<u32>;

/// Offsets of the Moore neighbourhood (all 8 surrounding cells)
const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Offsets of the von Neumann neighbourhood (orthogonal cells only)
const VON_NEUMANN: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

fn count_neighbors(grid: &Grid, x: isize, y: isize, offsets: &[(isize, isize)], state: CellState) -> u32 {
    offsets
        .iter()
        .filter(|(dx, dy)| grid.get(x + dx, y + dy) == state)
        .count() as u32
}

/// Life-like rule with configurable survival and birth counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOfLifeRule {
    survival: RuleSet,
    birth: RuleSet,
}

impl Default for GameOfLifeRule {
    /// Conway's rule, S23/B3
    fn default() -> Self {
        Self {
            survival: RuleSet::from([2, 3]),
            birth: RuleSet::from([3]),
        }
    }
}

impl GameOfLifeRule {
    pub fn new(survival: &RuleSet, birth: &RuleSet) -> Self {
        Self {
            survival: survival.clone(),
            birth: birth.clone(),
        }
    }

    pub fn survival_rules(&self) -> &RuleSet {
        &self.survival
    }

    pub fn birth_rules(&self) -> &RuleSet {
        &self.birth
    }

    /// Replace both sets with copies of the given ones
    pub fn set_rules(&mut self, survival: &RuleSet, birth: &RuleSet) {
        self.survival = survival.clone();
        self.birth = birth.clone();
    }

    /// Replace both sets from text such as `"23"` or `"12,3"`.
    ///
    /// Both texts are parsed before anything is replaced, so on error the
    /// current sets are left untouched.
    pub fn set_rules_from_str(&mut self, survival: &str, birth: &str) -> Result<(), RuleParseError> {
        let survival = parse_rule_set(survival)?;
        let birth = parse_rule_set(birth)?;
        debug!(
            "Rule set changed from {} to S{}/B{}",
            self.rule_string(),
            survival.iter().join(","),
            birth.iter().join(",")
        );
        self.survival = survival;
        self.birth = birth;
        Ok(())
    }

    /// Notation such as `S23/B3`, comma separated when a count exceeds 9
    pub fn rule_string(&self) -> String {
        format!("S{}/B{}", format_counts(&self.survival), format_counts(&self.birth))
    }

    /// Whether a cell in `current` state with `neighbors` live neighbours lives on
    pub fn should_be_alive(&self, current: CellState, neighbors: u32) -> bool {
        if current == CellState::Alive {
            self.survival.contains(&neighbors)
        } else {
            self.birth.contains(&neighbors)
        }
    }

    pub fn next_state(&self, grid: &Grid, x: isize, y: isize) -> CellState {
        let neighbors = count_neighbors(grid, x, y, &MOORE, CellState::Alive);
        if self.should_be_alive(grid.get(x, y), neighbors) {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

fn format_counts(counts: &RuleSet) -> String {
    if counts.iter().all(|&count| count < 10) {
        counts.iter().join("")
    } else {
        counts.iter().join(",")
    }
}

/// Parse rule text into a set of neighbour counts.
///
/// Everything but digits and commas is dropped first. With a comma present
/// the text is split on commas and each non-empty piece is one count;
/// otherwise every digit is its own count, so `"23"` is {2, 3}.
pub fn parse_rule_set(text: &str) -> Result<RuleSet, RuleParseError> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    if !clean.contains(',') {
        return Ok(clean.chars().filter_map(|c| c.to_digit(10)).collect());
    }

    let segments: Vec<&str> = clean.split(',').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(RuleParseError::NoCounts { text: text.to_string() });
    }

    segments
        .into_iter()
        .map(|segment| {
            segment.parse::<u32>().map_err(|_| RuleParseError::InvalidCount {
                segment: segment.to_string(),
            })
        })
        .collect()
}

/// Wireworld: a four-state wire and electron automaton
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireworldRule;

impl WireworldRule {
    pub fn next_state(&self, grid: &Grid, x: isize, y: isize) -> CellState {
        match grid.get(x, y) {
            CellState::Head => CellState::Tail,
            CellState::Tail => CellState::Conductor,
            CellState::Conductor => {
                // diagonals do not conduct
                match count_neighbors(grid, x, y, &VON_NEUMANN, CellState::Head) {
                    1 | 2 => CellState::Head,
                    _ => CellState::Conductor,
                }
            }
            _ => CellState::Empty,
        }
    }
}

/// The active automaton rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    GameOfLife(GameOfLifeRule),
    Wireworld(WireworldRule),
}

impl Default for Rule {
    fn default() -> Self {
        Rule::game_of_life()
    }
}

impl Rule {
    /// Game of Life with the default S23/B3 rule set
    pub fn game_of_life() -> Self {
        Rule::GameOfLife(GameOfLifeRule::default())
    }

    pub fn wireworld() -> Self {
        Rule::Wireworld(WireworldRule)
    }

    /// Next state of cell (x, y), computed from the grid as it is now
    pub fn next_state(&self, grid: &Grid, x: isize, y: isize) -> CellState {
        match self {
            Rule::GameOfLife(rule) => rule.next_state(grid, x, y),
            Rule::Wireworld(rule) => rule.next_state(grid, x, y),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Rule::GameOfLife(_) => Family::GameOfLife,
            Rule::Wireworld(_) => Family::Wireworld,
        }
    }

    pub fn default_state(&self) -> CellState {
        self.family().default_state()
    }

    /// Tag written to saved documents
    pub fn type_tag(&self) -> &'static str {
        match self {
            Rule::GameOfLife(_) => "GAMEOFLIFE",
            Rule::Wireworld(_) => "WIREWORLD",
        }
    }

    pub fn as_game_of_life(&self) -> Option<&GameOfLifeRule> {
        match self {
            Rule::GameOfLife(rule) => Some(rule),
            Rule::Wireworld(_) => None,
        }
    }

    pub fn as_game_of_life_mut(&mut self) -> Option<&mut GameOfLifeRule> {
        match self {
            Rule::GameOfLife(rule) => Some(rule),
            Rule::Wireworld(_) => None,
        }
    }
}
