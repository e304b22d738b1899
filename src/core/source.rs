//! Seam between the search core and whatever retrieves season data.
//!
//! The core only ever sees validated [`Season`] values; where they come
//! from (a remote API dump, fixtures, a generator) is behind
//! [`SeasonSource`].

use crate::core::season::{Season, SeasonError, SeasonRecord};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Provider of season data.
pub trait SeasonSource {
    /// Seasons this source can load, ascending.
    fn available_seasons(&self) -> Result<Vec<u32>, SeasonError>;

    /// Load and validate one season.
    fn load_season(&self, year: u32) -> Result<Season, SeasonError>;
}

/// Reads `<dir>/<year>.json` files holding a [`SeasonRecord`] each.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn season_path(&self, year: u32) -> PathBuf {
        self.dir.join(format!("{}.json", year))
    }
}

impl SeasonSource for JsonDirSource {
    fn available_seasons(&self) -> Result<Vec<u32>, SeasonError> {
        let mut years = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(year) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
            {
                years.push(year);
            }
        }
        years.sort_unstable();
        Ok(years)
    }

    fn load_season(&self, year: u32) -> Result<Season, SeasonError> {
        let path = self.season_path(year);
        if !path.is_file() {
            return Err(SeasonError::NotFound(year));
        }
        debug!("loading season {} from {}", year, path.display());
        let content = fs::read_to_string(&path)?;
        let record: SeasonRecord = serde_json::from_str(&content)?;
        Season::from_record(record)
    }
}

/// In-memory source, used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    seasons: BTreeMap<u32, Season>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, season: Season) {
        self.seasons.insert(season.year(), season);
    }
}

impl FromIterator<Season> for MemorySource {
    fn from_iter<T: IntoIterator<Item = Season>>(iter: T) -> Self {
        let mut source = Self::new();
        for season in iter {
            source.insert(season);
        }
        source
    }
}

impl SeasonSource for MemorySource {
    fn available_seasons(&self) -> Result<Vec<u32>, SeasonError> {
        Ok(self.seasons.keys().copied().collect())
    }

    fn load_season(&self, year: u32) -> Result<Season, SeasonError> {
        self.seasons
            .get(&year)
            .cloned()
            .ok_or(SeasonError::NotFound(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::team::Team;

    #[test]
    fn test_memory_source() {
        let source: MemorySource = [Season::new(2001), Season::new(1999)].into_iter().collect();
        assert_eq!(source.available_seasons().unwrap(), vec![1999, 2001]);
        assert_eq!(source.load_season(2001).unwrap().year(), 2001);
        assert!(matches!(
            source.load_season(2000),
            Err(SeasonError::NotFound(2000))
        ));
    }

    #[test]
    fn test_json_dir_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut season = Season::new(2010);
        season.add_team(Team::new(1, "Adelaide", "ADE"));
        let json = serde_json::to_string(&season.to_record()).unwrap();
        fs::write(dir.path().join("2010.json"), json).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("combined.json"), "{}").unwrap();

        let source = JsonDirSource::new(dir.path());
        assert_eq!(source.available_seasons().unwrap(), vec![2010]);
        let loaded = source.load_season(2010).unwrap();
        assert_eq!(loaded.team_count(), 1);
        assert!(matches!(
            source.load_season(2011),
            Err(SeasonError::NotFound(2011))
        ));
    }

    #[test]
    fn test_json_dir_source_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2012.json"), "{ not json").unwrap();
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(
            source.load_season(2012),
            Err(SeasonError::Json(_))
        ));
    }
}
