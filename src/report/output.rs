use crate::core::game::GameResult;
use crate::core::season::Season;
use crate::core::team::TeamId;
use crate::search::driver::{RoundOutcome, SeasonOutcome};
use crate::search::stats::SearchStats;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access output '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to (de)serialize output '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The winning cycle as published to reporting and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub cycle: Vec<TeamId>,
    pub cycle_names: Vec<String>,
    pub completion_time: DateTime<Utc>,
    pub completion_round: u32,
    /// The game behind each edge, in cycle order.
    pub games: Vec<GameResult>,
}

/// Serializable outcome of one season's run, keyed by season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalOutput {
    pub season: u32,
    pub found: bool,
    pub round_found: Option<u32>,
    #[serde(flatten)]
    pub stats: SearchStats,
    pub first_hamiltonian_cycle: Option<CycleRecord>,
    pub rounds: Vec<RoundOutcome>,
}

impl TraversalOutput {
    pub fn new(outcome: &SeasonOutcome, season: &Season) -> Self {
        let first_hamiltonian_cycle = outcome.best.as_ref().map(|cycle| CycleRecord {
            cycle: cycle.teams().to_vec(),
            cycle_names: cycle.team_names(season),
            completion_time: cycle.completion_time(),
            completion_round: cycle.completion_round(),
            games: cycle
                .matches()
                .iter()
                .filter_map(|m| {
                    season
                        .round(m.round)
                        .and_then(|r| r.games.iter().find(|g| g.id == m.game_id))
                        .cloned()
                })
                .collect(),
        });
        Self {
            season: outcome.season,
            found: outcome.found(),
            round_found: outcome.round_found,
            stats: outcome.stats,
            first_hamiltonian_cycle,
            rounds: outcome.rounds.clone(),
        }
    }

    /// `<out_dir>/<season>/<season>_traversal_output.json`
    pub fn path_in(out_dir: &Path, season: u32) -> PathBuf {
        out_dir
            .join(season.to_string())
            .join(format!("{}_traversal_output.json", season))
    }

    /// Write this record under `out_dir`, creating the season directory.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf, ReportError> {
        let path = Self::path_in(out_dir, self.season);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ReportError::json(&path, e))?;
        fs::write(&path, json).map_err(|e| ReportError::io(&path, e))?;
        info!("season {}: output written to {}", self.season, path.display());
        Ok(path)
    }

    pub fn read_from(path: &Path) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ReportError::json(path, e))
    }
}
