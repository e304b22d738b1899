use crate::core::game::{GameResult, Match};
use crate::core::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors arising while assembling or loading a season.
#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("game {game} has the same team ({team}) at home and away")]
    SelfMatch { game: u64, team: TeamId },
    #[error("game {game} records winner {winner}, who did not play in it")]
    InvalidWinner { game: u64, winner: TeamId },
    #[error("game {game} references team {team}, which is not in the season's team list")]
    UnknownTeam { game: u64, team: TeamId },
    #[error("season {0} is not available from this source")]
    NotFound(u32),
    #[error("failed to read season data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse season data: {0}")]
    Json(#[from] serde_json::Error),
}

/// All games played in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResults {
    pub round: u32,
    pub games: Vec<GameResult>,
}

impl RoundResults {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            games: Vec::new(),
        }
    }

    /// The chronologically first game of the round (ties broken by game id).
    pub fn first_game(&self) -> Option<&GameResult> {
        self.games.iter().min_by_key(|g| (g.date, g.id))
    }

    /// The first decided game of the round, as a [`Match`].
    pub fn first_match(&self) -> Option<Match> {
        self.games
            .iter()
            .filter_map(GameResult::to_match)
            .min_by_key(|m| (m.date, m.game_id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Interchange document a data source delivers for one season.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season: u32,
    pub teams: Vec<Team>,
    pub games: Vec<GameResult>,
}

/// One season: the team directory plus its round-partitioned results.
///
/// Games are validated on entry, so every [`Match`] derived from a season
/// has distinct winner and loser, both of which are known teams.
///
/// # Examples
///
/// ```
/// use ladder_cycle::core::game::GameResult;
/// use ladder_cycle::core::season::Season;
/// use ladder_cycle::core::team::{Team, TeamId};
/// use chrono::{TimeZone, Utc};
///
/// let mut season = Season::new(2024);
/// season.add_team(Team::new(1, "Adelaide", "ADE"));
/// season.add_team(Team::new(2, "Brisbane", "BRI"));
/// season
///     .add_game(GameResult::new(
///         1, 1, TeamId::new(1), TeamId::new(2), (80, 60),
///         Utc.with_ymd_and_hms(2024, 3, 14, 8, 0, 0).unwrap(),
///     ))
///     .unwrap();
///
/// assert_eq!(season.team_count(), 2);
/// assert_eq!(season.rounds(), vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Season {
    year: u32,
    rounds: BTreeMap<u32, RoundResults>,
    teams: BTreeMap<TeamId, Team>,
}

impl Season {
    pub fn new(year: u32) -> Self {
        Self {
            year,
            rounds: BTreeMap::new(),
            teams: BTreeMap::new(),
        }
    }

    /// Build a season from its interchange record, validating every game.
    pub fn from_record(record: SeasonRecord) -> Result<Self, SeasonError> {
        let mut season = Self::new(record.season);
        for team in record.teams {
            season.add_team(team);
        }
        for game in record.games {
            season.add_game(game)?;
        }
        Ok(season)
    }

    pub fn to_record(&self) -> SeasonRecord {
        SeasonRecord {
            season: self.year,
            teams: self.teams.values().cloned().collect(),
            games: self.games().cloned().collect(),
        }
    }

    /// Register a team. The first registration of an id wins.
    pub fn add_team(&mut self, team: Team) {
        self.teams.entry(team.id).or_insert(team);
    }

    /// Add a game to its round after validating it against the team list.
    pub fn add_game(&mut self, game: GameResult) -> Result<(), SeasonError> {
        if game.home_team == game.away_team {
            return Err(SeasonError::SelfMatch {
                game: game.id,
                team: game.home_team,
            });
        }
        for team in [game.home_team, game.away_team] {
            if !self.teams.contains_key(&team) {
                return Err(SeasonError::UnknownTeam {
                    game: game.id,
                    team,
                });
            }
        }
        if let Some(winner) = game.winner {
            if winner != game.home_team && winner != game.away_team {
                return Err(SeasonError::InvalidWinner {
                    game: game.id,
                    winner,
                });
            }
        }
        self.rounds
            .entry(game.round)
            .or_insert_with(|| RoundResults::new(game.round))
            .games
            .push(game);
        Ok(())
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Number of teams taking part; a Hamiltonian cycle must visit all of them.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    /// Display name for a team, falling back to its numeric id.
    pub fn team_name(&self, id: TeamId) -> String {
        self.team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Round numbers with at least one game, ascending.
    pub fn rounds(&self) -> Vec<u32> {
        self.rounds.keys().copied().collect()
    }

    pub fn round(&self, round: u32) -> Option<&RoundResults> {
        self.rounds.get(&round)
    }

    /// All games in round order.
    pub fn games(&self) -> impl Iterator<Item = &GameResult> {
        self.rounds.values().flat_map(|r| r.games.iter())
    }

    /// Every decided game in the season.
    pub fn matches(&self) -> impl Iterator<Item = Match> + '_ {
        self.games().filter_map(GameResult::to_match)
    }

    /// Decided games from the opening round up to and including `round`.
    pub fn matches_up_to(&self, round: u32) -> impl Iterator<Item = Match> + '_ {
        self.rounds
            .range(..=round)
            .flat_map(|(_, r)| r.games.iter())
            .filter_map(GameResult::to_match)
    }

    pub fn game_count(&self) -> usize {
        self.rounds.values().map(RoundResults::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn game(id: u64, round: u32, home: u32, away: u32, score: (u32, u32)) -> GameResult {
        GameResult::new(
            id,
            round,
            TeamId::new(home),
            TeamId::new(away),
            score,
            Utc.with_ymd_and_hms(2024, 3, round, 10, id as u32 % 60, 0).unwrap(),
        )
    }

    fn three_team_season() -> Season {
        let mut season = Season::new(2024);
        season.add_team(Team::new(1, "Adelaide", "ADE"));
        season.add_team(Team::new(2, "Brisbane", "BRI"));
        season.add_team(Team::new(3, "Carlton", "CAR"));
        season
    }

    #[test]
    fn test_rounds_are_sorted() {
        let mut season = three_team_season();
        season.add_game(game(1, 3, 1, 2, (10, 5))).unwrap();
        season.add_game(game(2, 1, 2, 3, (10, 5))).unwrap();
        season.add_game(game(3, 2, 3, 1, (10, 5))).unwrap();
        assert_eq!(season.rounds(), vec![1, 2, 3]);
        assert_eq!(season.game_count(), 3);
    }

    #[test]
    fn test_matches_up_to_excludes_later_rounds_and_draws() {
        let mut season = three_team_season();
        season.add_game(game(1, 1, 1, 2, (10, 5))).unwrap();
        season.add_game(game(2, 1, 2, 3, (7, 7))).unwrap();
        season.add_game(game(3, 2, 3, 1, (10, 5))).unwrap();

        let up_to_one: Vec<Match> = season.matches_up_to(1).collect();
        assert_eq!(up_to_one.len(), 1);
        assert_eq!(up_to_one[0].winner, TeamId::new(1));
        assert_eq!(season.matches_up_to(2).count(), 2);
    }

    #[test]
    fn test_rejects_self_match() {
        let mut season = three_team_season();
        let err = season.add_game(game(1, 1, 2, 2, (10, 5))).unwrap_err();
        assert!(matches!(err, SeasonError::SelfMatch { .. }));
    }

    #[test]
    fn test_rejects_unknown_team() {
        let mut season = three_team_season();
        let err = season.add_game(game(1, 1, 1, 9, (10, 5))).unwrap_err();
        assert!(matches!(err, SeasonError::UnknownTeam { team, .. } if team == TeamId::new(9)));
    }

    #[test]
    fn test_rejects_winner_not_playing() {
        let mut season = three_team_season();
        let mut g = game(1, 1, 1, 2, (10, 5));
        g.winner = Some(TeamId::new(3));
        assert!(matches!(
            season.add_game(g),
            Err(SeasonError::InvalidWinner { .. })
        ));
    }

    #[test]
    fn test_first_game_of_round() {
        let mut season = three_team_season();
        season.add_game(game(5, 1, 1, 2, (10, 5))).unwrap();
        season.add_game(game(2, 1, 2, 3, (10, 5))).unwrap();
        let first = season.round(1).unwrap().first_game().unwrap();
        assert_eq!(first.id, 2);
        assert_eq!(season.round(1).unwrap().first_match().unwrap().game_id, 2);
    }

    #[test]
    fn test_record_round_trip_preserves_games() {
        let mut season = three_team_season();
        season.add_game(game(1, 1, 1, 2, (10, 5))).unwrap();
        season.add_game(game(2, 2, 2, 3, (10, 5))).unwrap();

        let rebuilt = Season::from_record(season.to_record()).unwrap();
        assert_eq!(rebuilt.year(), 2024);
        assert_eq!(rebuilt.team_count(), 3);
        assert_eq!(rebuilt.game_count(), 2);
        assert_eq!(rebuilt.team_name(TeamId::new(2)), "Brisbane");
        assert_eq!(rebuilt.team_name(TeamId::new(42)), "42");
    }
}
