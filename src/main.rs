//! ladder-cycle CLI
//!
//! Find the earliest Hamiltonian cycle of wins in one or more seasons.
//!
//! # Usage
//!
//! ```bash
//! # Search a single season from a directory of <year>.json files
//! ladder-cycle run --data data --season 2024
//!
//! # Search every season in the directory and keep the outputs
//! ladder-cycle run --data data --season all --out output
//!
//! # Merge per-season outputs into output/combined_outputs.json
//! ladder-cycle combine --out output
//!
//! # Generate a synthetic season for testing
//! ladder-cycle generate --teams 10 --rounds 12 --season 2030 --output data/2030.json
//! ```

use clap::{Parser, Subcommand};
use env_logger::Env;
use ladder_cycle::config::{RunScope, SearchConfig};
use ladder_cycle::core::source::{JsonDirSource, SeasonSource};
use ladder_cycle::report::combine::combine_outputs;
use ladder_cycle::report::output::TraversalOutput;
use ladder_cycle::search::driver::RoundDriver;
use ladder_cycle::search::engine::SearchEngine;
use ladder_cycle::simulation::season_generator::{generate_season, SeasonConfig};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Earliest Hamiltonian cycle of wins in a round-robin season", long_about = None)]
struct Cli {
    /// Log at debug level, including search progress
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search seasons round by round for the earliest Hamiltonian cycle
    Run {
        /// Directory holding <year>.json season files
        #[arg(long, value_name = "DIR")]
        data: PathBuf,
        /// A season, an inclusive range like 2000-2010, or 'all'
        #[arg(long, default_value = "all")]
        season: RunScope,
        /// Write per-season outputs (and the combined file) here
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// TOML file with worker pool settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Merge per-season outputs into combined_outputs.json
    Combine {
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },
    /// Generate a synthetic round-robin season and write it to disk
    Generate {
        #[arg(long, default_value_t = 18)]
        teams: usize,
        #[arg(long, default_value_t = 23)]
        rounds: u32,
        #[arg(long, default_value_t = 2024)]
        season: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run {
            data,
            season,
            out,
            config,
        } => run_search(data, season, out, config)?,
        Commands::Combine { out } => {
            let path = combine_outputs(&out)?;
            println!("Combined outputs written to {}", path.display());
        }
        Commands::Generate {
            teams,
            rounds,
            season,
            seed,
            output,
        } => run_generate(teams, rounds, season, seed, output)?,
    }
    Ok(())
}

fn run_search(
    data: PathBuf,
    scope: RunScope,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
) -> CliResult<()> {
    let config = match config {
        Some(path) => SearchConfig::from_file(&path)?,
        None => SearchConfig::default(),
    };
    let engine = SearchEngine::new(&config)?;
    let driver = RoundDriver::new(&engine);
    let source = JsonDirSource::new(data);

    let seasons = match scope {
        RunScope::Single(year) => vec![year],
        _ => scope.resolve(&source.available_seasons()?),
    };
    if seasons.is_empty() {
        warn!("no seasons in {} under {}", scope, source.dir().display());
        return Ok(());
    }
    info!(
        "processing {} season(s) with {} workers",
        seasons.len(),
        engine.worker_count()
    );

    for year in seasons {
        let season = source.load_season(year)?;
        let outcome = driver.process_season(&season);

        match &outcome.best {
            Some(cycle) => {
                println!(
                    "{}: Hamiltonian cycle found at round {}",
                    year,
                    outcome.round_found.unwrap_or_default()
                );
                println!("  {}", cycle.team_names(&season).join(" -> "));
                for line in cycle.details(&season).lines() {
                    println!("  {}", line);
                }
            }
            None => println!("{}: Hamiltonian cycle not found", year),
        }
        println!("  {}", outcome.stats);

        if let Some(out) = &out {
            TraversalOutput::new(&outcome, &season).write_to(out)?;
        }
    }

    if let Some(out) = &out {
        combine_outputs(out)?;
    }
    Ok(())
}

fn run_generate(
    teams: usize,
    rounds: u32,
    year: u32,
    seed: Option<u64>,
    output: PathBuf,
) -> CliResult<()> {
    let season = generate_season(&SeasonConfig {
        year,
        teams,
        rounds,
        seed,
        ..Default::default()
    });
    let json = serde_json::to_string_pretty(&season.to_record())?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, json)?;
    eprintln!(
        "Generated {} games across {} teams -> {}",
        season.game_count(),
        season.team_count(),
        output.display()
    );
    Ok(())
}
