use crate::core::team::TeamId;
use crate::graph::adjacency::AdjacencyGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

/// A strongly connected component of the win graph.
///
/// Every team in a component can reach every other through a chain of wins.
/// A Hamiltonian cycle can only exist when a single component covers the
/// whole season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinComponent {
    pub teams: Vec<TeamId>,
}

impl WinComponent {
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Strongly connected components, each sorted, ordered by their smallest team.
pub fn win_components(graph: &AdjacencyGraph) -> Vec<WinComponent> {
    let mut digraph: DiGraphMap<TeamId, ()> = DiGraphMap::new();
    for team in graph.teams() {
        digraph.add_node(team);
    }
    for (winner, loser) in graph.edges() {
        digraph.add_edge(winner, loser, ());
    }

    let mut components: Vec<WinComponent> = tarjan_scc(&digraph)
        .into_iter()
        .map(|mut teams| {
            teams.sort();
            WinComponent { teams }
        })
        .collect();
    components.sort_by_key(|c| c.teams.first().copied());
    components
}

/// True when all `team_count` teams lie in one strongly connected component.
pub fn is_strongly_connected(graph: &AdjacencyGraph, team_count: usize) -> bool {
    let components = win_components(graph);
    components.len() == 1 && components[0].len() == team_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32)]) -> AdjacencyGraph {
        let mut g = AdjacencyGraph::new();
        for (w, l) in edges {
            g.add_edge(TeamId::new(*w), TeamId::new(*l));
        }
        g
    }

    #[test]
    fn test_single_component() {
        let g = graph(&[(1, 2), (2, 3), (3, 1)]);
        assert!(is_strongly_connected(&g, 3));
        assert!(!is_strongly_connected(&g, 4));
    }

    #[test]
    fn test_disjoint_triangles_fail() {
        // every team has a win and a loss, but two separate loops
        let g = graph(&[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)]);
        assert!(g.feasibility_check(6));
        assert!(!is_strongly_connected(&g, 6));

        let components = win_components(&g);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].teams, vec![TeamId::new(1), TeamId::new(2), TeamId::new(3)]);
    }

    #[test]
    fn test_chain_is_all_singletons() {
        let g = graph(&[(1, 2), (2, 3)]);
        let components = win_components(&g);
        assert_eq!(components.len(), 3);
        assert!(components.iter().all(|c| c.len() == 1));
    }
}
