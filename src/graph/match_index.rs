use crate::core::game::Match;
use crate::core::season::Season;
use crate::core::team::TeamId;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Precomputed lookup of the earliest game in which one team beat another.
///
/// Built once per season, before any search starts, so the search hot path
/// never touches the data source.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    first: HashMap<(TeamId, TeamId), Match>,
    round_openers: BTreeMap<u32, Match>,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every decided game of the season.
    pub fn from_season(season: &Season) -> Self {
        Self::from_matches(season.matches())
    }

    pub fn from_matches<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = Match>,
    {
        let mut index = Self::new();
        for m in matches {
            index.insert(m);
        }
        index
    }

    /// Add a game, keeping only the earliest per `(winner, loser)` pair and per round.
    pub fn insert(&mut self, m: Match) {
        self.first
            .entry((m.winner, m.loser))
            .and_modify(|existing| {
                if m.chronology_key() < existing.chronology_key() {
                    *existing = m;
                }
            })
            .or_insert(m);
        self.round_openers
            .entry(m.round)
            .and_modify(|existing| {
                if (m.date, m.game_id) < (existing.date, existing.game_id) {
                    *existing = m;
                }
            })
            .or_insert(m);
    }

    /// Earliest game in which `winner` beat `loser`.
    pub fn first_match(&self, winner: TeamId, loser: TeamId) -> Option<&Match> {
        self.first.get(&(winner, loser))
    }

    /// Date of the earliest game backing the edge `winner -> loser`.
    ///
    /// # Panics
    ///
    /// Panics if no such game was indexed. Every edge of an
    /// [`AdjacencyGraph`](crate::graph::adjacency::AdjacencyGraph) built from
    /// the same season has one, so a miss means the graph and index disagree.
    pub fn edge_date(&self, winner: TeamId, loser: TeamId) -> DateTime<Utc> {
        self.expect_match(winner, loser).date
    }

    /// Like [`first_match`](Self::first_match) for an edge known to exist.
    ///
    /// # Panics
    ///
    /// Panics if no game backs the edge.
    pub fn expect_match(&self, winner: TeamId, loser: TeamId) -> &Match {
        self.first_match(winner, loser).unwrap_or_else(|| {
            panic!(
                "edge {} -> {} has no backing game in the match index",
                winner, loser
            )
        })
    }

    /// Chronologically first decided game of `round`.
    pub fn earliest_match_of_round(&self, round: u32) -> Option<&Match> {
        self.round_openers.get(&round)
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}
