/// CFL API raw wire types: serde shapes for deserializing `/v1/games` responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamesResponse {
    #[serde(default)]
    pub data: Vec<CflGame>,
    #[serde(default)]
    pub errors: Vec<CflError>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CflError {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CflGame {
    pub game_id: Option<u64>,
    pub date_start: Option<String>, // ISO 8601 with offset
    pub week: Option<u8>,
    pub season: Option<u16>,
    pub event_type: Option<CflEventType>,
    pub event_status: Option<CflEventStatus>,
    pub team_1: Option<CflTeam>, // usually the visitor
    pub team_2: Option<CflTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CflEventType {
    pub event_type_id: Option<u8>,
    pub name: Option<String>, // "Preseason", "Regular Season", "Playoffs", "Grey Cup"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CflEventStatus {
    pub event_status_id: Option<u8>,
    pub name: Option<String>, // "Pre-Game", "In Progress", "Final", ...
    pub is_active: Option<bool>,
    pub quarter: Option<u8>,
    pub minutes: Option<u8>,
    pub seconds: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CflTeam {
    pub team_id: Option<u32>,
    pub abbreviation: Option<String>,
    pub score: Option<u16>,
    pub is_at_home: Option<bool>,
}

impl CflGame {
    pub fn is_preseason(&self) -> bool {
        self.event_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .is_some_and(|name| name.eq_ignore_ascii_case("preseason"))
    }
}
