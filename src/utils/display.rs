//! Display and output formatting utilities

use crate::automaton::{Grid, Simulation};
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format grids and simulations for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form, one glyph per cell
    pub fn format_grid_compact(grid: &Grid) -> String {
        grid.to_string()
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                let glyph = grid.get(x as isize, y as isize).glyph();
                output.push(glyph);
                output.push(glyph);
            }
            output.push('\n');
        }

        output
    }

    /// One-line description of a simulation
    pub fn format_header(sim: &Simulation) -> String {
        let mut header = format!(
            "{} {}x{} at generation {}",
            sim.rule().type_tag(),
            sim.grid().width(),
            sim.grid().height(),
            sim.generation()
        );
        if let Some(life) = sim.rule().as_game_of_life() {
            header.push_str(&format!(" ({})", life.rule_string()));
        }
        header
    }

    /// Table of state counts
    pub fn format_census(sim: &Simulation) -> String {
        let total = (sim.grid().width() * sim.grid().height()) as f64;
        let mut output = String::new();

        output.push_str("State     | Cells  | Share\n");
        output.push_str("----------|--------|-------\n");
        for (state, count) in sim.census() {
            output.push_str(&format!(
                "{:9} | {:6} | {:5.1}%\n",
                state,
                count,
                count as f64 / total * 100.0
            ));
        }

        output
    }

    /// Write the simulation to `output_dir` in the chosen format and return
    /// the path written
    pub fn save_result<P: AsRef<Path>>(
        sim: &Simulation,
        output_dir: P,
        name: &str,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let filepath = output_dir.join(format!("{name}.txt"));
                let content = format!(
                    "{}\n{}",
                    Self::format_header(sim),
                    Self::format_grid_compact(sim.grid())
                );
                std::fs::write(&filepath, content)
                    .with_context(|| format!("Failed to write {}", filepath.display()))?;
                Ok(filepath)
            }
            OutputFormat::Json => {
                let filepath = output_dir.join(format!("{name}.json"));
                crate::automaton::save_simulation(&filepath, sim.grid(), sim.rule())?;
                Ok(filepath)
            }
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
