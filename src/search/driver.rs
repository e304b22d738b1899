use crate::core::season::Season;
use crate::graph::adjacency::AdjacencyGraph;
use crate::graph::connectivity::is_strongly_connected;
use crate::graph::match_index::MatchIndex;
use crate::search::cycle::HamiltonianCycle;
use crate::search::engine::SearchEngine;
use crate::search::heuristics::SearchPlan;
use crate::search::stats::SearchStats;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// How a single round boundary was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Some team has yet to record a win or a loss; search skipped.
    Infeasible,
    /// Every team has a win and a loss, but the win graph splits apart; search skipped.
    NotStronglyConnected,
    /// Searched without finding a cycle.
    NoCycle,
    CycleFound,
}

impl RoundStatus {
    pub fn was_searched(self) -> bool {
        matches!(self, RoundStatus::NoCycle | RoundStatus::CycleFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub status: RoundStatus,
    /// Distinct win edges at this round boundary.
    pub edges: usize,
    pub branches: usize,
    pub stats: SearchStats,
}

/// Result of processing one season round by round.
#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    pub season: u32,
    pub best: Option<HamiltonianCycle>,
    /// Round boundary at which the best cycle was found.
    pub round_found: Option<u32>,
    /// Search statistics summed across every searched round.
    pub stats: SearchStats,
    pub rounds: Vec<RoundOutcome>,
}

impl SeasonOutcome {
    pub fn found(&self) -> bool {
        self.best.is_some()
    }
}

/// Walks a season's rounds in order, rebuilding the win graph at each
/// boundary and searching it, until a round yields a cycle.
///
/// # Examples
///
/// ```
/// use ladder_cycle::config::SearchConfig;
/// use ladder_cycle::search::driver::RoundDriver;
/// use ladder_cycle::search::engine::SearchEngine;
/// use ladder_cycle::simulation::season_generator::{generate_season, SeasonConfig};
///
/// let season = generate_season(&SeasonConfig { teams: 5, rounds: 8, ..Default::default() });
/// let engine = SearchEngine::new(&SearchConfig::with_workers(2)).unwrap();
/// let outcome = RoundDriver::new(&engine).process_season(&season);
///
/// if let Some(cycle) = &outcome.best {
///     assert_eq!(cycle.len(), 5);
/// }
/// ```
pub struct RoundDriver<'e> {
    engine: &'e SearchEngine,
}

impl<'e> RoundDriver<'e> {
    pub fn new(engine: &'e SearchEngine) -> Self {
        Self { engine }
    }

    pub fn process_season(&self, season: &Season) -> SeasonOutcome {
        let team_count = season.team_count();
        let index = MatchIndex::from_season(season);
        let mut outcome = SeasonOutcome {
            season: season.year(),
            best: None,
            round_found: None,
            stats: SearchStats::new(),
            rounds: Vec::new(),
        };

        info!(
            "season {}: {} teams, {} games over {} rounds",
            season.year(),
            team_count,
            season.game_count(),
            season.rounds().len()
        );

        for round in season.rounds() {
            let graph = AdjacencyGraph::up_to_round(season, round);
            let (round_outcome, best) = self.process_round(&graph, &index, round, team_count);
            outcome.stats += round_outcome.stats;
            outcome.rounds.push(round_outcome);

            if best.is_some() {
                outcome.best = best;
                outcome.round_found = Some(round);
                break;
            }
        }

        match &outcome.best {
            Some(cycle) => {
                info!(
                    "season {}: Hamiltonian cycle found at round {}: {}",
                    season.year(),
                    outcome.round_found.unwrap_or_default(),
                    cycle.team_names(season).join(" -> ")
                );
                info!("{}", cycle.details(season).trim_end());
            }
            None => info!("season {}: Hamiltonian cycle not found", season.year()),
        }
        info!("season {}: {}", season.year(), outcome.stats);
        outcome
    }

    fn process_round(
        &self,
        graph: &AdjacencyGraph,
        index: &MatchIndex,
        round: u32,
        team_count: usize,
    ) -> (RoundOutcome, Option<HamiltonianCycle>) {
        let mut round_outcome = RoundOutcome {
            round,
            status: RoundStatus::Infeasible,
            edges: graph.edge_count(),
            branches: 0,
            stats: SearchStats::new(),
        };

        if !graph.feasibility_check(team_count) {
            info!(
                "round {}: infeasible ({} winners, {} losers of {} teams)",
                round,
                graph.winners().len(),
                graph.losers().len(),
                team_count
            );
            return (round_outcome, None);
        }
        if !is_strongly_connected(graph, team_count) {
            round_outcome.status = RoundStatus::NotStronglyConnected;
            info!("round {}: infeasible (win graph not strongly connected)", round);
            return (round_outcome, None);
        }

        let plan = SearchPlan::new(graph, index, round, team_count);
        round_outcome.branches = plan.seeds.len();
        debug!(
            "round {}: {} branches, early-exit bound {:?}",
            round,
            plan.seeds.len(),
            plan.early_exit_threshold
        );

        let result = self.engine.search(graph, index, team_count, &plan);
        round_outcome.stats = result.stats;
        round_outcome.status = if result.best.is_some() {
            RoundStatus::CycleFound
        } else {
            RoundStatus::NoCycle
        };
        info!("round {}: {}", round, result.stats);
        (round_outcome, result.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::core::game::GameResult;
    use crate::core::team::{Team, TeamId};
    use chrono::{TimeZone, Utc};

    /// (round, winner, loser, day)
    fn season(team_count: u32, games: &[(u32, u32, u32, u32)]) -> Season {
        let mut season = Season::new(2024);
        for id in 1..=team_count {
            season.add_team(Team::new(id, format!("Team {}", id), ""));
        }
        for (i, (round, w, l, day)) in games.iter().enumerate() {
            season
                .add_game(GameResult::new(
                    i as u64 + 1,
                    *round,
                    TeamId::new(*w),
                    TeamId::new(*l),
                    (100, 50),
                    Utc.with_ymd_and_hms(2024, 3, *day, 12, 0, 0).unwrap(),
                ))
                .unwrap();
        }
        season
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(&SearchConfig::with_workers(2)).unwrap()
    }

    #[test]
    fn test_stops_at_first_round_with_cycle() {
        let s = season(3, &[(1, 1, 2, 1), (2, 2, 3, 8), (3, 3, 1, 15), (4, 2, 1, 22)]);
        let engine = engine();
        let outcome = RoundDriver::new(&engine).process_season(&s);

        assert_eq!(outcome.round_found, Some(3));
        assert_eq!(outcome.rounds.len(), 3);
        assert_eq!(outcome.rounds[0].status, RoundStatus::Infeasible);
        assert_eq!(outcome.rounds[2].status, RoundStatus::CycleFound);
        assert_eq!(outcome.best.unwrap().completion_round(), 3);
    }

    #[test]
    fn test_infeasible_rounds_record_zero_steps() {
        let s = season(4, &[(1, 1, 2, 1), (2, 2, 3, 2), (3, 3, 4, 3)]);
        let engine = engine();
        let outcome = RoundDriver::new(&engine).process_season(&s);

        assert!(!outcome.found());
        assert_eq!(outcome.round_found, None);
        assert_eq!(outcome.rounds.len(), 3);
        assert!(outcome.rounds.iter().all(|r| !r.status.was_searched()));
        assert_eq!(outcome.stats.total_steps, 0);
    }

    #[test]
    fn test_split_graph_is_not_searched() {
        let s = season(
            4,
            &[(1, 1, 2, 1), (1, 3, 4, 1), (2, 2, 1, 8), (2, 4, 3, 8)],
        );
        let engine = engine();
        let outcome = RoundDriver::new(&engine).process_season(&s);
        assert_eq!(outcome.rounds[1].status, RoundStatus::NotStronglyConnected);
        assert_eq!(outcome.rounds[1].stats.total_steps, 0);
        assert!(!outcome.found());
    }

    #[test]
    fn test_empty_season() {
        let engine = engine();
        let outcome = RoundDriver::new(&engine).process_season(&Season::new(1990));
        assert!(!outcome.found());
        assert!(outcome.rounds.is_empty());
    }
}
