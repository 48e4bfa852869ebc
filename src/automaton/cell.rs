//! Cell states for the two supported automata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The family of states a grid is populated with.
///
/// A grid only ever holds states from one family; the active rule decides
/// which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    GameOfLife,
    Wireworld,
}

impl Family {
    /// State used to fill new grids and returned for out-of-bounds reads
    pub fn default_state(self) -> CellState {
        match self {
            Family::GameOfLife => CellState::Dead,
            Family::Wireworld => CellState::Empty,
        }
    }

    /// All states of this family, default first
    pub fn states(self) -> &'static [CellState] {
        match self {
            Family::GameOfLife => &[CellState::Dead, CellState::Alive],
            Family::Wireworld => &[
                CellState::Empty,
                CellState::Conductor,
                CellState::Head,
                CellState::Tail,
            ],
        }
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "gameoflife" | "life" => Ok(Family::GameOfLife),
            "wireworld" => Ok(Family::Wireworld),
            _ => Err(format!("unknown automaton '{s}', expected game-of-life or wireworld")),
        }
    }
}

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellState {
    // Game of Life
    Dead,
    Alive,

    // Wireworld
    Empty,
    Conductor,
    Head,
    Tail,
}

impl CellState {
    pub fn family(self) -> Family {
        match self {
            CellState::Dead | CellState::Alive => Family::GameOfLife,
            CellState::Empty | CellState::Conductor | CellState::Head | CellState::Tail => {
                Family::Wireworld
            }
        }
    }

    pub fn is_game_of_life(self) -> bool {
        self.family() == Family::GameOfLife
    }

    pub fn is_wireworld(self) -> bool {
        self.family() == Family::Wireworld
    }

    /// Single character used by the text renderer
    pub fn glyph(self) -> char {
        match self {
            CellState::Dead | CellState::Empty => '·',
            CellState::Alive => '█',
            CellState::Conductor => '#',
            CellState::Head => 'H',
            CellState::Tail => 't',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Dead => "DEAD",
            CellState::Alive => "ALIVE",
            CellState::Empty => "EMPTY",
            CellState::Conductor => "CONDUCTOR",
            CellState::Head => "HEAD",
            CellState::Tail => "TAIL",
        };
        f.write_str(name)
    }
}

impl FromStr for CellState {
    type Err = String;

    /// Accepts the document token names in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEAD" => Ok(CellState::Dead),
            "ALIVE" => Ok(CellState::Alive),
            "EMPTY" => Ok(CellState::Empty),
            "CONDUCTOR" => Ok(CellState::Conductor),
            "HEAD" => Ok(CellState::Head),
            "TAIL" => Ok(CellState::Tail),
            _ => Err(format!("unknown cell state '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_are_disjoint() {
        for state in Family::GameOfLife.states() {
            assert!(state.is_game_of_life());
            assert!(!state.is_wireworld());
        }
        for state in Family::Wireworld.states() {
            assert!(state.is_wireworld());
            assert!(!state.is_game_of_life());
        }
    }

    #[test]
    fn test_default_states() {
        assert_eq!(Family::GameOfLife.default_state(), CellState::Dead);
        assert_eq!(Family::Wireworld.default_state(), CellState::Empty);
        assert_eq!(Family::Wireworld.states()[0], CellState::Empty);
    }

    #[test]
    fn test_token_names() {
        assert_eq!(serde_json::to_string(&CellState::Conductor).unwrap(), "\"CONDUCTOR\"");
        let parsed: CellState = serde_json::from_str("\"ALIVE\"").unwrap();
        assert_eq!(parsed, CellState::Alive);
        assert_eq!(CellState::Tail.to_string(), "TAIL");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("head".parse::<CellState>(), Ok(CellState::Head));
        assert_eq!("ALIVE".parse::<CellState>(), Ok(CellState::Alive));
        assert!("spark".parse::<CellState>().is_err());

        assert_eq!("game-of-life".parse::<Family>(), Ok(Family::GameOfLife));
        assert_eq!("game_of_life".parse::<Family>(), Ok(Family::GameOfLife));
        assert_eq!("Wireworld".parse::<Family>(), Ok(Family::Wireworld));
        assert!("langton".parse::<Family>().is_err());
    }
}
