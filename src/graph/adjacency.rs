use crate::core::game::Match;
use crate::core::season::Season;
use crate::core::team::TeamId;
use std::collections::{BTreeMap, BTreeSet};

static NO_TEAMS: BTreeSet<TeamId> = BTreeSet::new();

/// Which end of the out-degree range to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Directed "defeated" graph: each winner maps to the set of teams it has beaten.
///
/// Edges have set semantics, so beating the same team twice leaves the
/// graph unchanged. Self-loops are rejected. Ordered collections keep every
/// query deterministic.
///
/// The graph is rebuilt from scratch for each round boundary rather than
/// patched incrementally.
///
/// # Examples
///
/// ```
/// use ladder_cycle::graph::adjacency::AdjacencyGraph;
/// use ladder_cycle::core::team::TeamId;
///
/// let (a, b, c) = (TeamId::new(1), TeamId::new(2), TeamId::new(3));
/// let mut graph = AdjacencyGraph::new();
/// graph.add_edge(a, b);
/// graph.add_edge(b, c);
/// graph.add_edge(c, a);
///
/// assert!(graph.feasibility_check(3));
/// assert_eq!(graph.teams_with_exactly_one_win(), vec![a, b, c]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// winner -> teams it has beaten
    beaten: BTreeMap<TeamId, BTreeSet<TeamId>>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a collection of decided games.
    pub fn from_matches<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = Match>,
    {
        let mut graph = Self::new();
        for m in matches {
            graph.add_edge(m.winner, m.loser);
        }
        graph
    }

    /// Graph of every decided game up to and including `round`.
    pub fn up_to_round(season: &Season, round: u32) -> Self {
        Self::from_matches(season.matches_up_to(round))
    }

    /// Record that `winner` beat `loser`. Returns `false` if the edge already existed.
    ///
    /// # Panics
    ///
    /// Panics if `winner == loser`.
    pub fn add_edge(&mut self, winner: TeamId, loser: TeamId) -> bool {
        assert_ne!(winner, loser, "team {} cannot defeat itself", winner);
        self.beaten.entry(winner).or_default().insert(loser)
    }

    /// Teams `team` has beaten; empty if it has never won.
    pub fn out_set(&self, team: TeamId) -> &BTreeSet<TeamId> {
        self.beaten.get(&team).unwrap_or(&NO_TEAMS)
    }

    pub fn contains_edge(&self, winner: TeamId, loser: TeamId) -> bool {
        self.out_set(winner).contains(&loser)
    }

    pub fn out_degree(&self, team: TeamId) -> usize {
        self.out_set(team).len()
    }

    /// Teams that have beaten `team`.
    pub fn in_set(&self, team: TeamId) -> BTreeSet<TeamId> {
        self.beaten
            .iter()
            .filter(|(_, losers)| losers.contains(&team))
            .map(|(winner, _)| *winner)
            .collect()
    }

    /// Distinct teams with at least one win.
    pub fn winners(&self) -> BTreeSet<TeamId> {
        self.beaten.keys().copied().collect()
    }

    /// Distinct teams with at least one loss.
    pub fn losers(&self) -> BTreeSet<TeamId> {
        self.beaten.values().flatten().copied().collect()
    }

    /// Every team appearing on either end of an edge.
    pub fn teams(&self) -> BTreeSet<TeamId> {
        let mut teams = self.winners();
        teams.extend(self.losers());
        teams
    }

    /// All edges as `(winner, loser)`, ordered.
    pub fn edges(&self) -> impl Iterator<Item = (TeamId, TeamId)> + '_ {
        self.beaten
            .iter()
            .flat_map(|(w, losers)| losers.iter().map(move |l| (*w, *l)))
    }

    pub fn edge_count(&self) -> usize {
        self.beaten.values().map(BTreeSet::len).sum()
    }

    /// Winners whose out-degree is exactly `n`, ascending by id.
    pub fn teams_with_out_degree(&self, n: usize) -> Vec<TeamId> {
        self.beaten
            .iter()
            .filter(|(_, losers)| losers.len() == n)
            .map(|(w, _)| *w)
            .collect()
    }

    /// Winners sharing the largest (or smallest) out-degree, ascending by id.
    ///
    /// Only teams with at least one win are considered.
    pub fn extremal_out_degree_teams(&self, which: Extremum) -> Vec<TeamId> {
        let degrees = self.beaten.values().map(BTreeSet::len);
        let target = match which {
            Extremum::Max => degrees.max(),
            Extremum::Min => degrees.min(),
        };
        match target {
            Some(n) => self.teams_with_out_degree(n),
            None => Vec::new(),
        }
    }

    /// Teams whose only win is forced into any Hamiltonian cycle.
    pub fn teams_with_exactly_one_win(&self) -> Vec<TeamId> {
        self.teams_with_out_degree(1)
    }

    /// Teams whose only loss is forced into any Hamiltonian cycle.
    pub fn teams_with_exactly_one_loss(&self) -> Vec<TeamId> {
        let mut losses: BTreeMap<TeamId, usize> = BTreeMap::new();
        for loser in self.beaten.values().flatten() {
            *losses.entry(*loser).or_insert(0) += 1;
        }
        losses
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(team, _)| team)
            .collect()
    }

    /// Necessary condition for a Hamiltonian cycle over `team_count` teams:
    /// every team has won at least once and lost at least once.
    pub fn feasibility_check(&self, team_count: usize) -> bool {
        self.winners().len() == team_count && self.losers().len() == team_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: u32) -> TeamId {
        TeamId::new(id)
    }

    fn graph(edges: &[(u32, u32)]) -> AdjacencyGraph {
        let mut g = AdjacencyGraph::new();
        for (w, l) in edges {
            g.add_edge(t(*w), t(*l));
        }
        g
    }

    #[test]
    fn test_repeated_wins_are_idempotent() {
        let mut g = AdjacencyGraph::new();
        assert!(g.add_edge(t(1), t(2)));
        assert!(!g.add_edge(t(1), t(2)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.out_degree(t(1)), 1);
    }

    #[test]
    #[should_panic(expected = "cannot defeat itself")]
    fn test_self_loop_rejected() {
        AdjacencyGraph::new().add_edge(t(1), t(1));
    }

    #[test]
    fn test_out_set_of_winless_team_is_empty() {
        let g = graph(&[(1, 2)]);
        assert!(g.out_set(t(2)).is_empty());
        assert!(g.out_set(t(99)).is_empty());
        assert_eq!(g.in_set(t(2)), BTreeSet::from([t(1)]));
    }

    #[test]
    fn test_extremal_out_degree() {
        let g = graph(&[(1, 2), (1, 3), (2, 3), (3, 1), (4, 1), (4, 2)]);
        assert_eq!(g.extremal_out_degree_teams(Extremum::Max), vec![t(1), t(4)]);
        assert_eq!(g.extremal_out_degree_teams(Extremum::Min), vec![t(2), t(3)]);
        assert_eq!(g.teams_with_out_degree(2), vec![t(1), t(4)]);
        assert!(AdjacencyGraph::new()
            .extremal_out_degree_teams(Extremum::Max)
            .is_empty());
    }

    #[test]
    fn test_exactly_one_win_and_loss() {
        // 1 beats 2 and 3; 2 beats 3; 3 beats 1
        let g = graph(&[(1, 2), (1, 3), (2, 3), (3, 1)]);
        assert_eq!(g.teams_with_exactly_one_win(), vec![t(2), t(3)]);
        assert_eq!(g.teams_with_exactly_one_loss(), vec![t(1), t(2)]);
    }

    #[test]
    fn test_feasibility_requires_full_coverage() {
        let cycle = graph(&[(1, 2), (2, 3), (3, 4), (4, 1)]);
        assert!(cycle.feasibility_check(4));
        assert!(!cycle.feasibility_check(5));

        let missing_win = graph(&[(1, 2), (2, 3), (3, 4)]);
        assert!(!missing_win.feasibility_check(4));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let edges = [(3, 1), (1, 2), (2, 3), (1, 2)];
        assert_eq!(graph(&edges), graph(&edges));
        let collected: Vec<_> = graph(&edges).edges().collect();
        assert_eq!(collected, vec![(t(1), t(2)), (t(2), t(3)), (t(3), t(1))]);
    }
}
