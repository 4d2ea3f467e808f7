pub mod cfl;
pub mod client;

use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::time::Duration;

pub use client::{ApiError, ApiResult, CflApi};

/// Delay between two attempts against the provider after a failure.
pub const NETWORK_RETRY_SLEEP_TIME: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the CFL wire format
// ---------------------------------------------------------------------------

/// Provider order is significant: the board addresses games by index.
pub type GameList = Vec<Game>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub home_team_abbrev: String,
    pub away_team_abbrev: String,
    pub state: GameState,
    /// Game clock; only meaningful while `state` is `InProgress`.
    pub quarter: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub home_score: u16,
    pub away_score: u16,
    pub week: u8,
    /// Kickoff, in the offset the provider reported.
    pub date: Option<DateTime<FixedOffset>>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.state == GameState::InProgress
    }

    /// True if either team code appears in `teams`.
    pub fn involves(&self, teams: &[String]) -> bool {
        teams
            .iter()
            .any(|team| *team == self.home_team_abbrev || *team == self.away_team_abbrev)
    }

    /// End of the second quarter with the clock at zero.
    pub fn is_halftime(&self) -> bool {
        self.quarter == 2 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({})", self.away_team_abbrev, self.home_team_abbrev, self.state)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Postponed,
    Cancelled,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Scheduled => "Scheduled",
            GameState::InProgress => "In-Progress",
            GameState::Final => "Final",
            GameState::Postponed => "Postponed",
            GameState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Season {
    pub year: u16,
    pub week: u8,
    pub preseason: bool,
}

// ---------------------------------------------------------------------------
// Provider contract
// ---------------------------------------------------------------------------

/// Source of game data for the board. Calls block the current thread.
///
/// Every error is transient from the caller's point of view; the board
/// retries all of them the same way.
pub trait GameDataProvider {
    /// Games of the current week, in provider order.
    fn get_all_games(&self) -> ApiResult<GameList>;

    /// Detailed, up-to-date record for a single game.
    fn get_overview(&self, game_id: &str) -> ApiResult<Game>;

    fn get_current_season(&self) -> ApiResult<Season>;
}
