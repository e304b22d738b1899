use crate::search::cycle::HamiltonianCycle;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

const NO_BEST: i64 = i64::MAX;

/// Earliest-completing cycle seen so far in a round's search.
///
/// The only mutation is [`try_replace`](Self::try_replace), a
/// compare-and-replace under a mutex. The completion time of the current
/// best is mirrored into an atomic so branches can prune without taking
/// the lock.
#[derive(Debug)]
pub struct BestCycleTracker {
    best: Mutex<Option<HamiltonianCycle>>,
    /// Completion time of `best` in microseconds since the epoch, `NO_BEST` when empty.
    bound_micros: AtomicI64,
}

impl Default for BestCycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BestCycleTracker {
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            bound_micros: AtomicI64::new(NO_BEST),
        }
    }

    /// Store `candidate` if there is no best yet or it completes strictly earlier.
    ///
    /// Returns `true` when the candidate became the new best.
    pub fn try_replace(&self, candidate: HamiltonianCycle) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        let improves = match best.as_ref() {
            None => true,
            Some(current) => candidate.completion_time() < current.completion_time(),
        };
        if improves {
            self.bound_micros
                .store(candidate.completion_time().timestamp_micros(), Ordering::Release);
            *best = Some(candidate);
        }
        improves
    }

    /// True when a best exists and `date` falls strictly after its completion time.
    pub fn is_later_than_best(&self, date: DateTime<Utc>) -> bool {
        let bound = self.bound_micros.load(Ordering::Acquire);
        bound != NO_BEST && date.timestamp_micros() > bound
    }

    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(HamiltonianCycle::completion_time)
    }

    pub fn best(&self) -> Option<HamiltonianCycle> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_best(self) -> Option<HamiltonianCycle> {
        self.best
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn reset(&self) {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        *best = None;
        self.bound_micros.store(NO_BEST, Ordering::Release);
    }
}
