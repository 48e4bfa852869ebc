//! Command line front end for the Game of Life / Wireworld simulator

use anyhow::{Context, Result};
use cellsim::{
    automaton::{create_example_saves, load_simulation, save_simulation, CellState, Family, Simulation},
    config::{CliOverrides, Settings},
    utils::{ColorOutput, GridFormatter},
};
use clap::{Parser, Subcommand};
use log::warn;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cellsim")]
#[command(about = "Game of Life and Wireworld simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a simulation by a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Saved simulation to start from (an empty grid is used otherwise)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Automaton for an empty grid: game-of-life or wireworld (overrides config)
        #[arg(short, long)]
        automaton: Option<Family>,

        /// Survival counts, e.g. "23" or "2,3" (overrides config)
        #[arg(long)]
        survival: Option<String>,

        /// Birth counts, e.g. "3" (overrides config)
        #[arg(long)]
        birth: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the final state to the output directory
        #[arg(long)]
        save: bool,

        /// Print every generation, not just the last
        #[arg(long)]
        show_evolution: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and saved simulations
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show a saved simulation and its state counts
    Analyze {
        /// Saved simulation file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Replace the survival/birth counts of a saved Game of Life simulation
    Rules {
        /// Saved simulation file
        #[arg(short, long)]
        input: PathBuf,

        /// Survival counts, e.g. "23" or "2,3"
        #[arg(short, long)]
        survival: String,

        /// Birth counts, e.g. "3"
        #[arg(short, long)]
        birth: String,

        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Paint or toggle a single cell of a saved simulation
    Paint {
        /// Saved simulation file
        #[arg(short, long)]
        input: PathBuf,

        /// Column
        #[arg(short, allow_hyphen_values = true)]
        x: isize,

        /// Row
        #[arg(short, allow_hyphen_values = true)]
        y: isize,

        /// State to paint; toggles a Game of Life cell when omitted
        #[arg(short, long)]
        state: Option<CellState>,

        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            input,
            generations,
            automaton,
            survival,
            birth,
            output,
            save,
            show_evolution,
            verbose,
        } => {
            let overrides = CliOverrides {
                generations,
                automaton,
                survival,
                birth,
                output_dir: output,
            };
            run_command(config, input, overrides, save, show_evolution, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze { input } => analyze_command(input),
        Commands::Rules {
            input,
            survival,
            birth,
            output,
        } => rules_command(input, survival, birth, output),
        Commands::Paint {
            input,
            x,
            y,
            state,
            output,
        } => paint_command(input, x, y, state, output),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

/// Automaton requested on the command line that disagrees with a loaded simulation
fn ignored_automaton(requested: Option<Family>, sim: &Simulation) -> Option<Family> {
    requested.filter(|&family| family != sim.rule().family())
}

fn run_command(
    config_path: PathBuf,
    input: Option<PathBuf>,
    overrides: CliOverrides,
    save: bool,
    show_evolution: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("▶ Starting simulation"));

    let mut settings = load_settings(&config_path)?;
    let rule_override = overrides.survival.is_some() || overrides.birth.is_some();
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut sim = match &input {
        Some(path) => Simulation::from(load_simulation(path)?),
        None => settings.new_simulation()?,
    };

    if input.is_some() {
        if let Some(family) = ignored_automaton(overrides.automaton, &sim) {
            warn!(
                "Automaton override {:?} ignored, the input file holds a {:?} simulation",
                family,
                sim.rule().family()
            );
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "--automaton {:?} ignored, input is a {:?} simulation",
                    family,
                    sim.rule().family()
                ))
            );
        }
    }

    if rule_override {
        match sim.rule_mut().as_game_of_life_mut() {
            Some(life) => life
                .set_rules_from_str(&settings.rules.survival, &settings.rules.birth)
                .context("Invalid rule override")?,
            None => warn!("Survival/birth overrides ignored for a Wireworld simulation"),
        }
    }

    if verbose {
        println!("Configuration:");
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Simulation: {}", GridFormatter::format_header(&sim));
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let start_time = Instant::now();
    if show_evolution {
        println!("{}", GridFormatter::format_header(&sim));
        println!("{}", GridFormatter::format_grid_compact(sim.grid()));
        for _ in 0..settings.simulation.generations {
            sim.step();
            println!("{}", GridFormatter::format_header(&sim));
            println!("{}", GridFormatter::format_grid_compact(sim.grid()));
        }
    } else {
        sim.step_n(settings.simulation.generations);
        println!("{}", GridFormatter::format_header(&sim));
        println!("{}", GridFormatter::format_grid_compact(sim.grid()));
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Advanced {} generation(s) in {:.3}s",
            settings.simulation.generations,
            start_time.elapsed().as_secs_f64()
        ))
    );

    if verbose {
        println!("\n{}", GridFormatter::format_census(&sim));
    }

    if save {
        let path = GridFormatter::save_result(
            &sim,
            &settings.output.output_directory,
            &format!("generation_{:04}", sim.generation()),
            settings.output.format,
        )
        .context("Failed to save result")?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let saves_dir = directory.join("saves");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &saves_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut default_settings = Settings::default();
        default_settings.output.output_directory = output_dir.clone();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_saves(&saves_dir).context("Failed to create example saves")?;
    println!("Created example simulations in: {}", saves_dir.display());

    // Wireworld variant of the configuration
    let mut wire_config = Settings::default();
    wire_config.simulation.automaton = Family::Wireworld;
    wire_config.simulation.generations = 12;
    wire_config.output.output_directory = output_dir;
    wire_config.to_file(config_dir.join("wireworld.yaml"))?;

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!(
        "1. Run: cellsim run --config {} --input {} --show-evolution",
        config_path.display(),
        saves_dir.join("glider.json").display()
    );
    println!("2. Edit rules: cellsim rules --input <save> --survival 23 --birth 36");

    Ok(())
}

fn analyze_command(input: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing simulation..."));

    let sim = Simulation::from(load_simulation(&input)?);

    println!("{}", GridFormatter::format_header(&sim));
    println!("{}", GridFormatter::format_grid_with_coords(sim.grid()));
    println!("{}", GridFormatter::format_census(&sim));

    Ok(())
}

fn rules_command(input: PathBuf, survival: String, birth: String, output: Option<PathBuf>) -> Result<()> {
    let (grid, mut rule) = load_simulation(&input)?.into_parts();

    let Some(life) = rule.as_game_of_life_mut() else {
        anyhow::bail!("{} is a Wireworld simulation, which has no rule set", input.display());
    };

    if let Err(e) = life.set_rules_from_str(&survival, &birth) {
        println!("{}", ColorOutput::error(&format!("❌ Rule edit rejected: {e}")));
        warn!("Keeping rule set {} for {}", life.rule_string(), input.display());
        return Err(e.into());
    }
    let summary = life.rule_string();

    let target = output.unwrap_or(input);
    save_simulation(&target, &grid, &rule)?;
    println!(
        "{}",
        ColorOutput::success(&format!("Rule set {} written to {}", summary, target.display()))
    );

    Ok(())
}

fn paint_command(
    input: PathBuf,
    x: isize,
    y: isize,
    state: Option<CellState>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut sim = Simulation::from(load_simulation(&input)?);

    if x < 0 || y < 0 || x as usize >= sim.grid().width() || y as usize >= sim.grid().height() {
        println!(
            "{}",
            ColorOutput::warning(&format!("({x}, {y}) is outside the grid, nothing changed"))
        );
    }

    match state {
        Some(state) => sim.paint(x, y, state)?,
        None => sim.toggle(x, y)?,
    }

    let target = output.unwrap_or(input);
    save_simulation(&target, sim.grid(), sim.rule())?;
    println!(
        "{}",
        ColorOutput::success(&format!(
            "({x}, {y}) is now {} in {}",
            sim.grid().get(x, y),
            target.display()
        ))
    );

    Ok(())
}
