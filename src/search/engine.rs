use crate::config::SearchConfig;
use crate::core::team::TeamId;
use crate::graph::adjacency::AdjacencyGraph;
use crate::graph::match_index::MatchIndex;
use crate::search::cycle::HamiltonianCycle;
use crate::search::heuristics::SearchPlan;
use crate::search::stats::{SearchStats, SharedCounters};
use crate::search::tracker::BestCycleTracker;
use chrono::{DateTime, Utc};
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to start search workers: {0}")]
    WorkerPool(#[from] ThreadPoolBuildError),
}

/// Result of one step of a branch.
///
/// `Backtrack` means every extension from this depth was tried; the other
/// three are terminal for the path that reached them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Backtrack,
    CycleFound,
    DeadEnd,
    Aborted,
}

/// How a whole branch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// At least one Hamiltonian cycle was closed inside the branch.
    CycleFound,
    /// The subtree was exhausted without closing a cycle.
    DeadEnd,
    /// The early-exit flag cut the branch short.
    Aborted,
}

/// What a round's search produced.
#[derive(Debug, Clone)]
pub struct RoundSearch {
    pub best: Option<HamiltonianCycle>,
    pub stats: SearchStats,
    pub outcomes: Vec<BranchOutcome>,
}

/// State shared, read-mostly, by every branch of one round.
struct SearchContext<'a> {
    graph: &'a AdjacencyGraph,
    index: &'a MatchIndex,
    team_count: usize,
    early_exit_threshold: Option<DateTime<Utc>>,
    tracker: &'a BestCycleTracker,
    abort: &'a AtomicBool,
    counters: &'a SharedCounters,
    progress_logging: bool,
}

/// Depth-first search over one seed prefix, owning its path.
struct Branch<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    path: Vec<TeamId>,
    visited: HashSet<TeamId>,
    stats: SearchStats,
}

impl<'c, 'a> Branch<'c, 'a> {
    fn new(ctx: &'c SearchContext<'a>, seed: &[TeamId]) -> Self {
        let mut path = Vec::with_capacity(ctx.team_count);
        path.extend_from_slice(seed);
        Self {
            ctx,
            visited: seed.iter().copied().collect(),
            path,
            stats: SearchStats::new(),
        }
    }

    fn run(mut self) -> BranchOutcome {
        let outcome = match self.step() {
            Step::Aborted => BranchOutcome::Aborted,
            _ if self.stats.cycles_found > 0 => BranchOutcome::CycleFound,
            Step::CycleFound => BranchOutcome::CycleFound,
            Step::Backtrack | Step::DeadEnd => BranchOutcome::DeadEnd,
        };
        self.ctx.counters.add(&self.stats);
        debug!(
            "branch {:?} finished {:?} after {} steps",
            &self.path,
            outcome,
            self.stats.total_steps
        );
        outcome
    }

    fn step(&mut self) -> Step {
        self.stats.total_steps += 1;
        if self.ctx.progress_logging && is_progress_milestone(self.stats.total_steps) {
            debug!(
                "branch {:?} | steps: {} | cycles found: {}",
                &self.path[..self.path.len().min(3)],
                self.stats.total_steps,
                self.stats.cycles_found
            );
        }

        if self.ctx.abort.load(Ordering::Acquire) {
            return Step::Aborted;
        }

        let graph = self.ctx.graph;
        let Some(&current) = self.path.last() else {
            return Step::DeadEnd;
        };

        if self.path.len() == self.ctx.team_count {
            return self.close_cycle(current);
        }

        for &next in graph.out_set(current) {
            if self.visited.contains(&next) {
                continue;
            }
            let edge_date = self.ctx.index.edge_date(current, next);
            if self.ctx.tracker.is_later_than_best(edge_date) {
                self.stats.skipped_steps += 1;
                continue;
            }

            self.path.push(next);
            self.visited.insert(next);
            let result = self.step();
            self.visited.remove(&next);
            self.path.pop();

            if result == Step::Aborted || self.ctx.abort.load(Ordering::Acquire) {
                return Step::Aborted;
            }
        }
        Step::Backtrack
    }

    /// Full-length path: succeed if the last team beat the first.
    fn close_cycle(&mut self, last: TeamId) -> Step {
        let first = self.path[0];
        if !self.ctx.graph.contains_edge(last, first) {
            self.stats.full_paths_not_hamiltonian += 1;
            return Step::DeadEnd;
        }

        let cycle = HamiltonianCycle::from_path(&self.path, self.ctx.index);
        let completion = cycle.completion_time();
        self.stats.cycles_found += 1;

        if self.ctx.tracker.try_replace(cycle) {
            debug!("new best cycle completing {}", completion);
            if let Some(threshold) = self.ctx.early_exit_threshold {
                if completion <= threshold {
                    debug!("completion {} meets early-exit bound {}", completion, threshold);
                    self.ctx.abort.store(true, Ordering::Release);
                }
            }
        }
        Step::CycleFound
    }
}

/// Step counts worth a progress line: every power-of-ten step while small,
/// thinning out as the count grows, then every million.
pub fn is_progress_milestone(steps: u64) -> bool {
    const THRESHOLDS: [u64; 7] = [10, 100, 1_000, 10_000, 100_000, 500_000, 1_000_000];
    let largest = THRESHOLDS[THRESHOLDS.len() - 1];
    if steps > largest {
        return steps % largest == 0;
    }
    THRESHOLDS
        .iter()
        .find(|t| steps < *t * 10)
        .is_some_and(|t| steps % t == 0)
}

/// Runs the branches of a round's search on a fixed-size worker pool.
///
/// Branches never wait on each other. They share only the best-cycle
/// tracker, the abort flag and the diagnostic counters, and observe the
/// abort flag cooperatively between steps.
pub struct SearchEngine {
    pool: ThreadPool,
    progress_logging: bool,
}

impl SearchEngine {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let workers = config.worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cycle-search-{}", i))
            .build()?;
        debug!("search pool started with {} workers", workers);
        Ok(Self {
            pool,
            progress_logging: config.progress_logging,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Search every seed of `plan`, blocking until all branches finish or abort.
    pub fn search(
        &self,
        graph: &AdjacencyGraph,
        index: &MatchIndex,
        team_count: usize,
        plan: &SearchPlan,
    ) -> RoundSearch {
        let tracker = BestCycleTracker::new();
        let abort = AtomicBool::new(false);
        let counters = SharedCounters::new();
        let ctx = SearchContext {
            graph,
            index,
            team_count,
            early_exit_threshold: plan.early_exit_threshold,
            tracker: &tracker,
            abort: &abort,
            counters: &counters,
            progress_logging: self.progress_logging,
        };

        let outcomes: Vec<BranchOutcome> = self.pool.install(|| {
            plan.seeds
                .par_iter()
                .map(|seed| Branch::new(&ctx, seed).run())
                .collect()
        });

        let mut stats = counters.snapshot();
        stats.early_exit = abort.load(Ordering::Acquire);
        RoundSearch {
            best: tracker.into_best(),
            stats,
            outcomes,
        }
    }
}
