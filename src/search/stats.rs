use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};

/// Diagnostic counters for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Entries into the branch step function.
    pub total_steps: u64,
    /// Neighbours pruned because their edge is later than the current best.
    pub skipped_steps: u64,
    /// Full-length paths whose last team never beat the first.
    pub full_paths_not_hamiltonian: u64,
    pub cycles_found: u64,
    /// Whether the search was cut short by the early-exit bound.
    pub early_exit: bool,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.total_steps += rhs.total_steps;
        self.skipped_steps += rhs.skipped_steps;
        self.full_paths_not_hamiltonian += rhs.full_paths_not_hamiltonian;
        self.cycles_found += rhs.cycles_found;
        self.early_exit |= rhs.early_exit;
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total_steps={} skipped_steps={} full_paths_not_hamiltonian={} cycles_found={} early_exit={}",
            self.total_steps,
            self.skipped_steps,
            self.full_paths_not_hamiltonian,
            self.cycles_found,
            self.early_exit
        )
    }
}

/// Counters shared by all branches of one round's search.
///
/// Branches tally locally and fold in once when they finish; the totals are
/// diagnostic, so relaxed ordering is enough.
#[derive(Debug, Default)]
pub struct SharedCounters {
    total_steps: AtomicU64,
    skipped_steps: AtomicU64,
    full_paths_not_hamiltonian: AtomicU64,
    cycles_found: AtomicU64,
}

impl SharedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, local: &SearchStats) {
        self.total_steps
            .fetch_add(local.total_steps, Ordering::Relaxed);
        self.skipped_steps
            .fetch_add(local.skipped_steps, Ordering::Relaxed);
        self.full_paths_not_hamiltonian
            .fetch_add(local.full_paths_not_hamiltonian, Ordering::Relaxed);
        self.cycles_found
            .fetch_add(local.cycles_found, Ordering::Relaxed);
    }

    /// Current totals; `early_exit` is left for the caller to fill in.
    pub fn snapshot(&self) -> SearchStats {
        SearchStats {
            total_steps: self.total_steps.load(Ordering::Relaxed),
            skipped_steps: self.skipped_steps.load(Ordering::Relaxed),
            full_paths_not_hamiltonian: self.full_paths_not_hamiltonian.load(Ordering::Relaxed),
            cycles_found: self.cycles_found.load(Ordering::Relaxed),
            early_exit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign_accumulates() {
        let mut run = SearchStats::new();
        run += SearchStats {
            total_steps: 10,
            skipped_steps: 2,
            full_paths_not_hamiltonian: 1,
            cycles_found: 0,
            early_exit: false,
        };
        run += SearchStats {
            total_steps: 5,
            cycles_found: 3,
            early_exit: true,
            ..SearchStats::default()
        };
        assert_eq!(run.total_steps, 15);
        assert_eq!(run.skipped_steps, 2);
        assert_eq!(run.cycles_found, 3);
        assert!(run.early_exit);
    }

    #[test]
    fn test_shared_counters_snapshot() {
        let counters = SharedCounters::new();
        let local = SearchStats {
            total_steps: 7,
            skipped_steps: 1,
            full_paths_not_hamiltonian: 2,
            cycles_found: 1,
            early_exit: true,
        };
        counters.add(&local);
        counters.add(&local);
        let snap = counters.snapshot();
        assert_eq!(snap.total_steps, 14);
        assert_eq!(snap.full_paths_not_hamiltonian, 4);
        assert!(!snap.early_exit);
    }
}
