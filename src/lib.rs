//! # ladder-cycle
//!
//! Finds the earliest point in a round-robin season at which the season's
//! results contain a Hamiltonian cycle of wins: an ordering of every team
//! `T1 → T2 → … → Tn → T1` where each team beat the next.
//!
//! Rounds are processed in order. At each round boundary the win graph is
//! rebuilt from every result so far, checked for feasibility and searched by
//! a pool of depth-first workers that share the best cycle found and prune
//! any path already finishing later than it.
//!
//! ## Architecture
//!
//! - **core**: Teams, game results, seasons and the season data source
//! - **graph**: Win adjacency graph, first-match index, strong connectivity
//! - **search**: Cycle model, best-cycle tracker, heuristics, parallel search engine, round driver
//! - **report**: Serializable run output and combining outputs across seasons
//! - **simulation**: Synthetic round-robin seasons
//! - **config**: Worker pool settings and run scope

pub mod config;
pub mod core;
pub mod graph;
pub mod report;
pub mod search;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{RunScope, SearchConfig};
    pub use crate::core::game::{GameResult, Match};
    pub use crate::core::season::Season;
    pub use crate::core::source::{JsonDirSource, SeasonSource};
    pub use crate::core::team::{Team, TeamId};
    pub use crate::graph::adjacency::AdjacencyGraph;
    pub use crate::graph::match_index::MatchIndex;
    pub use crate::search::cycle::HamiltonianCycle;
    pub use crate::search::driver::{RoundDriver, SeasonOutcome};
    pub use crate::search::engine::SearchEngine;
}
