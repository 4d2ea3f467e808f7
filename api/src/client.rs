use crate::cfl::{CflGame, CflTeam, GamesResponse};
use crate::{Game, GameDataProvider, GameList, GameState, Season};
use chrono::{DateTime, Datelike, Utc};
use reqwest::blocking::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const CFL_API_V1: &str = "https://api.cfl.ca/v1";

/// CFL stats API client. Every call blocks the current thread.
#[derive(Debug, Clone)]
pub struct CflApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    /// Pin the season instead of deriving it from the clock.
    season: Option<u16>,
    timeout: Duration,
}

impl Default for CflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("cflboard/0.1 (scoreboard)")
                .build()
                .unwrap_or_default(),
            base_url: CFL_API_V1.to_owned(),
            api_key: None,
            season: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The response parsed but a record failed validation.
    Invalid(String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Invalid(msg) => write!(f, "Invalid data: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl CflApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_season(mut self, season: u16) -> Self {
        self.season = Some(season);
        self
    }

    fn season_year(&self) -> u16 {
        self.season.unwrap_or_else(|| Utc::now().year() as u16)
    }

    /// Every game of a season, in the order the API lists them (chronological).
    pub fn fetch_season_games(&self, season: u16) -> ApiResult<Vec<CflGame>> {
        let raw: GamesResponse = self.get(&format!("/games/{season}"))?;
        Ok(raw.data)
    }

    fn get(&self, path: &str) -> ApiResult<GamesResponse> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.get(&url).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request
            .send()
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        match response.error_for_status() {
            Ok(res) => {
                let body = res
                    .json::<GamesResponse>()
                    .map_err(|e| ApiError::Parsing(e, url.clone()))?;
                if body.data.is_empty()
                    && let Some(err) = body.errors.first()
                {
                    return Err(ApiError::Other(format!(
                        "{url}: {}",
                        err.message.as_deref().unwrap_or("unknown error")
                    )));
                }
                Ok(body)
            }
            Err(_) if status.is_client_error() => {
                Err(ApiError::NotFound(format!("{url} ({status})")))
            }
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }
}

impl GameDataProvider for CflApi {
    fn get_all_games(&self) -> ApiResult<GameList> {
        let raw = self.fetch_season_games(self.season_year())?;
        let Some(week) = current_week(&raw) else {
            return Ok(Vec::new());
        };
        raw.iter()
            .filter(|g| g.week == Some(week))
            .map(map_game)
            .collect()
    }

    fn get_overview(&self, game_id: &str) -> ApiResult<Game> {
        let season = self.season_year();
        let raw = self.get(&format!("/games/{season}/game/{game_id}"))?;
        let game = raw
            .data
            .first()
            .ok_or_else(|| ApiError::NotFound(format!("game {game_id} in season {season}")))?;
        map_game(game)
    }

    fn get_current_season(&self) -> ApiResult<Season> {
        let year = self.season_year();
        let raw = self.fetch_season_games(year)?;
        let week = current_week(&raw).unwrap_or_default();
        let preseason = raw
            .iter()
            .filter(|g| g.week == Some(week))
            .any(CflGame::is_preseason);
        Ok(Season { year, week, preseason })
    }
}

// ---------------------------------------------------------------------------
// Mapping: CFL wire types to clean domain types
// ---------------------------------------------------------------------------

/// Week of the first game still to be played or in progress; the last listed
/// week once nothing is left. Final, cancelled and postponed games count as
/// done. `None` for an empty schedule.
fn current_week(games: &[CflGame]) -> Option<u8> {
    games
        .iter()
        .find(|g| is_pending(g))
        .or_else(|| games.last())
        .and_then(|g| g.week)
}

fn map_game(raw: &CflGame) -> ApiResult<Game> {
    let id = raw
        .game_id
        .ok_or_else(|| ApiError::Invalid("game record without game_id".into()))?;
    let (home, away) = split_teams(raw, id)?;

    let date = match raw.date_start.as_deref() {
        Some(s) => Some(DateTime::parse_from_rfc3339(s).map_err(|e| {
            ApiError::Invalid(format!("game {id}: bad date_start {s:?}: {e}"))
        })?),
        None => None,
    };

    let status = raw.event_status.clone().unwrap_or_default();
    Ok(Game {
        id: id.to_string(),
        home_team_abbrev: team_abbrev(home, id)?,
        away_team_abbrev: team_abbrev(away, id)?,
        state: parse_status(status.name.as_deref().unwrap_or_default()),
        quarter: status.quarter.unwrap_or_default(),
        minutes: status.minutes.unwrap_or_default(),
        seconds: status.seconds.unwrap_or_default(),
        home_score: home.score.unwrap_or_default(),
        away_score: away.score.unwrap_or_default(),
        week: raw.week.unwrap_or_default(),
        date,
    })
}

/// Returns (home, away). `team_1` is the visitor unless flagged otherwise.
fn split_teams(raw: &CflGame, id: u64) -> ApiResult<(&CflTeam, &CflTeam)> {
    let (Some(t1), Some(t2)) = (raw.team_1.as_ref(), raw.team_2.as_ref()) else {
        return Err(ApiError::Invalid(format!("game {id}: missing team")));
    };
    if t1.is_at_home == Some(true) {
        Ok((t1, t2))
    } else {
        Ok((t2, t1))
    }
}

fn team_abbrev(team: &CflTeam, id: u64) -> ApiResult<String> {
    team.abbreviation
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_uppercase)
        .ok_or_else(|| ApiError::Invalid(format!("game {id}: team without abbreviation")))
}

fn is_pending(raw: &CflGame) -> bool {
    let name = raw
        .event_status
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .unwrap_or_default();
    matches!(parse_status(name), GameState::Scheduled | GameState::InProgress)
}

fn parse_status(s: &str) -> GameState {
    match s.to_ascii_lowercase().as_str() {
        "in progress" | "in-progress" => GameState::InProgress,
        "final" => GameState::Final,
        "postponed" => GameState::Postponed,
        "cancelled" | "canceled" => GameState::Cancelled,
        _ => GameState::Scheduled,
    }
}
