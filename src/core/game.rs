use crate::core::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed game as delivered by the data source.
///
/// A game is played between a home and an away team. `winner` is `None`
/// for a draw, which contributes no edge to the win graph.
///
/// # Examples
///
/// ```
/// use ladder_cycle::core::game::GameResult;
/// use ladder_cycle::core::team::TeamId;
/// use chrono::{TimeZone, Utc};
///
/// let game = GameResult::new(
///     1,
///     3,
///     TeamId::new(10),
///     TeamId::new(20),
///     (95, 71),
///     Utc.with_ymd_and_hms(2024, 3, 30, 8, 30, 0).unwrap(),
/// );
///
/// assert_eq!(game.winner(), Some(TeamId::new(10)));
/// assert_eq!(game.loser(), Some(TeamId::new(20)));
/// assert_eq!(game.winning_score(), Some(95));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: u64,
    pub round: u32,
    #[serde(default, alias = "roundname")]
    pub round_name: String,
    #[serde(alias = "hteamid")]
    pub home_team: TeamId,
    #[serde(alias = "ateamid")]
    pub away_team: TeamId,
    #[serde(alias = "hscore")]
    pub home_score: u32,
    #[serde(alias = "ascore")]
    pub away_score: u32,
    #[serde(default, alias = "winnerteamid")]
    pub winner: Option<TeamId>,
    pub date: DateTime<Utc>,
}

impl GameResult {
    /// Create a game result, deriving the winner from the scores.
    pub fn new(
        id: u64,
        round: u32,
        home_team: TeamId,
        away_team: TeamId,
        (home_score, away_score): (u32, u32),
        date: DateTime<Utc>,
    ) -> Self {
        let winner = match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Some(home_team),
            std::cmp::Ordering::Less => Some(away_team),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            id,
            round,
            round_name: format!("Round {}", round),
            home_team,
            away_team,
            home_score,
            away_score,
            winner,
            date,
        }
    }

    /// Winning team, if the game was not drawn and the recorded winner took part.
    pub fn winner(&self) -> Option<TeamId> {
        self.winner
            .filter(|w| *w == self.home_team || *w == self.away_team)
    }

    /// Losing team, `None` for a draw.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner()?;
        if winner == self.home_team {
            Some(self.away_team)
        } else {
            Some(self.home_team)
        }
    }

    pub fn winning_score(&self) -> Option<u32> {
        let winner = self.winner()?;
        Some(if winner == self.home_team {
            self.home_score
        } else {
            self.away_score
        })
    }

    pub fn losing_score(&self) -> Option<u32> {
        let winner = self.winner()?;
        Some(if winner == self.home_team {
            self.away_score
        } else {
            self.home_score
        })
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// The directed win this game contributes, if any.
    pub fn to_match(&self) -> Option<Match> {
        Some(Match {
            game_id: self.id,
            winner: self.winner()?,
            loser: self.loser()?,
            round: self.round,
            date: self.date,
        })
    }
}

/// A decided game reduced to the facts the search needs.
///
/// Immutable once built. `winner != loser` is guaranteed by season
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub game_id: u64,
    pub winner: TeamId,
    pub loser: TeamId,
    pub round: u32,
    pub date: DateTime<Utc>,
}

impl Match {
    /// Ordering key for "earliest": round first, then kick-off, then id.
    pub fn chronology_key(&self) -> (u32, DateTime<Utc>, u64) {
        (self.round, self.date, self.game_id)
    }
}
