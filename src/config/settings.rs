//! Configuration settings for the automaton simulator

use crate::automaton::{Family, GameOfLifeRule, Rule, Simulation};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub rules: RulesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub automaton: Family,
    pub width: usize,
    pub height: usize,
    pub generations: usize,
}

/// Game of Life rule text, in the same notation the rule editor accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub survival: String,
    pub birth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                automaton: Family::GameOfLife,
                width: 32,
                height: 32,
                generations: 10,
            },
            rules: RulesConfig {
                survival: "23".to_string(),
                birth: "3".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Json,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.width == 0 || self.simulation.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.simulation.width,
                self.simulation.height
            );
        }

        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        self.rule().context("Invalid rule configuration")?;
        Ok(())
    }

    /// The rule described by these settings. Rule text only matters for
    /// Game of Life.
    pub fn rule(&self) -> Result<Rule> {
        match self.simulation.automaton {
            Family::GameOfLife => {
                let mut rule = GameOfLifeRule::default();
                rule.set_rules_from_str(&self.rules.survival, &self.rules.birth)?;
                Ok(Rule::GameOfLife(rule))
            }
            Family::Wireworld => Ok(Rule::wireworld()),
        }
    }

    /// Empty simulation sized and ruled by these settings
    pub fn new_simulation(&self) -> Result<Simulation> {
        let rule = self.rule()?;
        Ok(Simulation::new(self.simulation.width, self.simulation.height, rule)?)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(automaton) = cli_overrides.automaton {
            self.simulation.automaton = automaton;
        }
        if let Some(ref survival) = cli_overrides.survival {
            self.rules.survival = survival.clone();
        }
        if let Some(ref birth) = cli_overrides.birth {
            self.rules.birth = birth.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub automaton: Option<Family>,
    pub survival: Option<String>,
    pub birth: Option<String>,
    pub output_dir: Option<PathBuf>,
}
