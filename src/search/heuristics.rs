//! Search planning: forced edges, the early-exit bound and seed branches.
//!
//! Every tie between candidate teams or edges is broken by lowest id so
//! that a given season always yields the same plan.

use crate::core::team::TeamId;
use crate::graph::adjacency::{AdjacencyGraph, Extremum};
use crate::graph::match_index::MatchIndex;
use chrono::{DateTime, Utc};

/// Everything the engine needs to search one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    /// Independent path prefixes, one branch each.
    pub seeds: Vec<Vec<TeamId>>,
    /// Lower bound on any cycle's completion time; meeting it ends the search.
    pub early_exit_threshold: Option<DateTime<Utc>>,
}

impl SearchPlan {
    pub fn new(graph: &AdjacencyGraph, index: &MatchIndex, round: u32, team_count: usize) -> Self {
        Self {
            seeds: seed_branches(graph, team_count),
            early_exit_threshold: early_exit_threshold(graph, index, round),
        }
    }
}

/// Edges that every Hamiltonian cycle must use, ascending.
///
/// A team with a single win must leave through that win; a team with a
/// single loss must be entered through it.
pub fn forced_edges(graph: &AdjacencyGraph) -> Vec<(TeamId, TeamId)> {
    let mut edges: Vec<(TeamId, TeamId)> = graph
        .teams_with_exactly_one_win()
        .into_iter()
        .filter_map(|w| graph.out_set(w).first().map(|l| (w, *l)))
        .collect();
    for loser in graph.teams_with_exactly_one_loss() {
        if let Some(winner) = graph.in_set(loser).first() {
            edges.push((*winner, loser));
        }
    }
    edges.sort();
    edges.dedup();
    edges
}

/// Earliest date among forced edges, falling back to the first game of `round`.
///
/// Any cycle contains every forced edge, so its completion time can never
/// precede this date.
pub fn early_exit_threshold(
    graph: &AdjacencyGraph,
    index: &MatchIndex,
    round: u32,
) -> Option<DateTime<Utc>> {
    forced_edges(graph)
        .into_iter()
        .map(|(w, l)| index.edge_date(w, l))
        .min()
        .or_else(|| index.earliest_match_of_round(round).map(|m| m.date))
}

/// Path prefixes that together cover every Hamiltonian cycle exactly once (up to rotation).
///
/// With a forced edge `w -> l`, every cycle can be rotated to start
/// `w, l, x` for some `x` that `l` beat, so each such triple is a branch.
/// Otherwise the cycle is rooted at the team with most wins and each of its
/// wins opens a branch.
pub fn seed_branches(graph: &AdjacencyGraph, team_count: usize) -> Vec<Vec<TeamId>> {
    if let Some((winner, loser)) = forced_edges(graph).first().copied() {
        if team_count <= 2 {
            return vec![vec![winner, loser]];
        }
        return graph
            .out_set(loser)
            .iter()
            .filter(|next| **next != winner)
            .map(|next| vec![winner, loser, *next])
            .collect();
    }

    match graph.extremal_out_degree_teams(Extremum::Max).first() {
        Some(root) => graph
            .out_set(*root)
            .iter()
            .map(|next| vec![*root, *next])
            .collect(),
        None => Vec::new(),
    }
}
