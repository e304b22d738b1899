//! Four-team cycle example.
//!
//! Walks a tiny season round by round and shows the round at which every
//! team can be chained into a single loop of wins.

use chrono::{TimeZone, Utc};
use ladder_cycle::config::SearchConfig;
use ladder_cycle::core::game::GameResult;
use ladder_cycle::core::season::Season;
use ladder_cycle::core::team::{Team, TeamId};
use ladder_cycle::search::driver::RoundDriver;
use ladder_cycle::search::engine::SearchEngine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════╗");
    println!("║  ladder-cycle: Four-Team Cycle Demo   ║");
    println!("╚═══════════════════════════════════════╝\n");

    let mut season = Season::new(2024);
    for (id, name, abbrev) in [
        (1, "Geelong", "GEE"),
        (2, "Hawthorn", "HAW"),
        (3, "Melbourne", "MEL"),
        (4, "Richmond", "RIC"),
    ] {
        season.add_team(Team::new(id, name, abbrev));
    }

    // (round, home, away, home score, away score, day of March)
    let fixtures = [
        (1, 1, 2, 95, 71, 7),
        (1, 3, 4, 88, 90, 8),
        (2, 2, 3, 102, 64, 14),
        (2, 4, 1, 77, 80, 15),
        (3, 3, 1, 60, 59, 21),
        (3, 4, 2, 110, 82, 22),
    ];
    for (i, (round, home, away, hs, aws, day)) in fixtures.into_iter().enumerate() {
        season.add_game(GameResult::new(
            i as u64 + 1,
            round,
            TeamId::new(home),
            TeamId::new(away),
            (hs, aws),
            Utc.with_ymd_and_hms(2024, 3, day, 19, 30, 0).unwrap(),
        ))?;
    }

    let engine = SearchEngine::new(&SearchConfig::with_workers(2))?;
    let outcome = RoundDriver::new(&engine).process_season(&season);

    println!("Rounds:");
    for round in &outcome.rounds {
        println!(
            "  Rd. {}: {:?} ({} edges, {} steps)",
            round.round, round.status, round.edges, round.stats.total_steps
        );
    }
    println!();

    match &outcome.best {
        Some(cycle) => {
            println!("Cycle: {}", cycle.team_names(&season).join(" → "));
            println!("{}", cycle.details(&season));
        }
        None => println!("No Hamiltonian cycle this season."),
    }
    println!("{}", outcome.stats);
    Ok(())
}
