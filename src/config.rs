//! Run configuration: worker pool sizing and the set of seasons to process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Earliest season with recorded results.
pub const FIRST_SEASON: u32 = 1897;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid season '{0}': expected a year, a range like 2000-2010, or 'all'")]
    InvalidScope(String),
    #[error("invalid season {0}: seasons start at {}", FIRST_SEASON)]
    SeasonTooEarly(u32),
}

/// Tuning for the branch worker pool.
///
/// ```toml
/// worker_reserve = 2
/// max_workers = 8
/// progress_logging = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hardware threads left free for the rest of the system.
    pub worker_reserve: usize,
    /// Upper limit on workers regardless of hardware.
    pub max_workers: Option<usize>,
    /// Emit debug-level progress lines at step milestones.
    pub progress_logging: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            worker_reserve: 2,
            max_workers: None,
            progress_logging: true,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Config with exactly `n` workers, for tests and benches.
    pub fn with_workers(n: usize) -> Self {
        Self {
            worker_reserve: 0,
            max_workers: Some(n.max(1)),
            progress_logging: false,
        }
    }

    /// Available parallelism minus the reserve, clamped to `1..=max_workers`.
    pub fn worker_count(&self) -> usize {
        let hardware = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let workers = hardware.saturating_sub(self.worker_reserve).max(1);
        match self.max_workers {
            Some(max) => workers.min(max.max(1)),
            None => workers,
        }
    }
}

/// Which seasons a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunScope {
    Single(u32),
    /// Inclusive range.
    Range { first: u32, last: u32 },
    All,
}

impl RunScope {
    /// Seasons from `available` that fall inside the scope, ascending.
    pub fn resolve(&self, available: &[u32]) -> Vec<u32> {
        let mut seasons: Vec<u32> = available
            .iter()
            .copied()
            .filter(|year| self.contains(*year))
            .collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }

    pub fn contains(&self, year: u32) -> bool {
        match *self {
            RunScope::Single(y) => year == y,
            RunScope::Range { first, last } => (first..=last).contains(&year),
            RunScope::All => true,
        }
    }
}

impl FromStr for RunScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RunScope::All);
        }
        let parse_year = |part: &str| -> Result<u32, ConfigError> {
            let year: u32 = part
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidScope(s.to_string()))?;
            if year < FIRST_SEASON {
                return Err(ConfigError::SeasonTooEarly(year));
            }
            Ok(year)
        };
        match s.split_once('-') {
            Some((a, b)) => {
                let (first, last) = (parse_year(a)?, parse_year(b)?);
                if first > last {
                    return Err(ConfigError::InvalidScope(s.to_string()));
                }
                Ok(RunScope::Range { first, last })
            }
            None => Ok(RunScope::Single(parse_year(s)?)),
        }
    }
}

impl std::fmt::Display for RunScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunScope::Single(y) => write!(f, "{}", y),
            RunScope::Range { first, last } => write!(f, "{}-{}", first, last),
            RunScope::All => write!(f, "all"),
        }
    }
}
