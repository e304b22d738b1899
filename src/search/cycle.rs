use crate::core::game::Match;
use crate::core::season::Season;
use crate::core::team::TeamId;
use crate::graph::adjacency::AdjacencyGraph;
use crate::graph::match_index::MatchIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// A Hamiltonian cycle of wins: each team beat the next, the last beat the first.
///
/// `matches[i]` is the earliest game in which `teams[i]` beat
/// `teams[(i + 1) % len]`. A cycle is only created by the search, from a
/// full-length path that closes back on its first team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HamiltonianCycle {
    teams: Vec<TeamId>,
    matches: Vec<Match>,
}

impl HamiltonianCycle {
    /// Materialize a closed path, attaching the earliest game behind every edge.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty or an edge has no backing game in `index`.
    pub fn from_path(path: &[TeamId], index: &MatchIndex) -> Self {
        assert!(!path.is_empty(), "a cycle needs at least one team");
        let matches = path
            .iter()
            .enumerate()
            .map(|(i, winner)| *index.expect_match(*winner, path[(i + 1) % path.len()]))
            .collect();
        Self {
            teams: path.to_vec(),
            matches,
        }
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Latest game date in the cycle: the moment the cycle became verifiable.
    pub fn completion_time(&self) -> DateTime<Utc> {
        self.matches
            .iter()
            .map(|m| m.date)
            .max()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Round of the latest game in the cycle.
    pub fn completion_round(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Checks the cycle against a win graph: full length, distinct teams, every edge present.
    pub fn is_valid_in(&self, graph: &AdjacencyGraph, team_count: usize) -> bool {
        let distinct: BTreeSet<&TeamId> = self.teams.iter().collect();
        self.teams.len() == team_count
            && distinct.len() == team_count
            && self
                .teams
                .iter()
                .enumerate()
                .all(|(i, w)| graph.contains_edge(*w, self.teams[(i + 1) % self.teams.len()]))
    }

    /// Team names in cycle order.
    pub fn team_names(&self, season: &Season) -> Vec<String> {
        self.teams.iter().map(|t| season.team_name(*t)).collect()
    }

    /// Multi-line summary: completion round and date, then one line per win.
    pub fn details(&self, season: &Season) -> String {
        let mut out = String::from("Hamiltonian Cycle Details\n");
        let _ = writeln!(
            out,
            "Rd. {} - {}",
            self.completion_round(),
            self.completion_time().format("%Y-%m-%d %H:%M:%S")
        );
        for m in &self.matches {
            let score = season
                .round(m.round)
                .and_then(|r| r.games.iter().find(|g| g.id == m.game_id))
                .and_then(|g| Some((g.winning_score()?, g.losing_score()?)));
            let _ = write!(
                out,
                "Rd. {}: {} def. {}",
                m.round,
                season.team_name(m.winner),
                season.team_name(m.loser)
            );
            match score {
                Some((ws, ls)) => {
                    let _ = writeln!(out, " ({} - {})", ws, ls);
                }
                None => out.push('\n'),
            }
        }
        out
    }
}

impl std::fmt::Display for HamiltonianCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let teams: Vec<String> = self.teams.iter().map(|t| t.to_string()).collect();
        write!(
            f,
            "Hamiltonian Cycle: {} (complete {})",
            teams.join(" -> "),
            self.completion_time().format("%Y-%m-%d")
        )
    }
}
