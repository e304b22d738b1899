//! Synthetic season example.
//!
//! Generates seeded round-robin seasons of increasing size and reports when
//! each first contains a Hamiltonian cycle of wins.

use ladder_cycle::config::SearchConfig;
use ladder_cycle::report::output::TraversalOutput;
use ladder_cycle::search::driver::RoundDriver;
use ladder_cycle::search::engine::SearchEngine;
use ladder_cycle::simulation::season_generator::{generate_season, SeasonConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  ladder-cycle: Synthetic Season Search    ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let engine = SearchEngine::new(&SearchConfig::default())?;
    let driver = RoundDriver::new(&engine);
    println!("Workers: {}\n", engine.worker_count());

    for (year, teams) in [(2030, 6), (2031, 10), (2032, 14), (2033, 18)] {
        let season = generate_season(&SeasonConfig {
            year,
            teams,
            rounds: 23,
            seed: Some(year as u64),
            ..Default::default()
        });
        let outcome = driver.process_season(&season);

        println!("━━━ {} ({} teams) ━━━", year, teams);
        match (&outcome.best, outcome.round_found) {
            (Some(cycle), Some(round)) => {
                println!("  Found at round {}, completing {}", round, cycle.completion_time());
                println!("  {}", cycle.team_names(&season).join(" → "));
            }
            _ => println!("  Not found"),
        }
        println!("  {}\n", outcome.stats);

        if year == 2030 {
            let output = TraversalOutput::new(&outcome, &season);
            println!("JSON record:\n{}\n", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
