use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a team (competitor) within a season.
///
/// Teams have no lifecycle of their own: they enter the win graph by
/// appearing in game results.
///
/// # Examples
///
/// ```
/// use ladder_cycle::core::team::TeamId;
///
/// let adelaide = TeamId::new(1);
/// let brisbane = TeamId::new(2);
/// assert_ne!(adelaide, brisbane);
/// assert!(adelaide < brisbane);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TeamId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Directory entry for a team taking part in a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Short code, e.g. "ADE".
    #[serde(default)]
    pub abbrev: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbrev: abbrev.into(),
            logo_url: None,
        }
    }

    /// File name component of the logo URL, if any.
    pub fn logo_filename(&self) -> Option<&str> {
        self.logo_url
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_equality() {
        assert_eq!(TeamId::new(4), TeamId::from(4));
        assert_ne!(TeamId::new(4), TeamId::new(5));
    }

    #[test]
    fn test_team_id_display() {
        assert_eq!(format!("{}", TeamId::new(17)), "17");
    }

    #[test]
    fn test_logo_filename() {
        let mut team = Team::new(1, "Adelaide", "ADE");
        assert_eq!(team.logo_filename(), None);

        team.logo_url = Some("/images/logos/adelaide.png".to_string());
        assert_eq!(team.logo_filename(), Some("adelaide.png"));

        team.logo_url = Some("/images/logos/".to_string());
        assert_eq!(team.logo_filename(), None);
    }
}
