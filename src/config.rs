use anyhow::Context;
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CFLBOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Board settings. Read once at startup and never mutated during a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Team codes in priority order, e.g. `["WPG", "BC"]`.
    pub preferred_teams: Vec<String>,
    pub rotation_enabled: bool,
    pub rotation_only_preferred: bool,
    pub rotation_preferred_team_live_enabled: bool,
    pub rotation_preferred_team_live_halftime: bool,
    /// Minimum seconds between two provider calls.
    pub data_refresh_rate: u64,
    /// Seconds a game stays on screen before the viewer rotates.
    pub rotation_rate: u64,
    pub log_level: Option<LevelFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred_teams: Vec::new(),
            rotation_enabled: true,
            rotation_only_preferred: false,
            rotation_preferred_team_live_enabled: true,
            rotation_preferred_team_live_halftime: false,
            data_refresh_rate: 15,
            rotation_rate: 15,
            log_level: None,
        }
    }
}

impl Config {
    /// Load from `$CFLBOARD_CONFIG`, falling back to `./config.json`.
    /// A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    pub fn data_refresh_rate(&self) -> Duration {
        Duration::from_secs(self.data_refresh_rate)
    }

    pub fn rotation_rate(&self) -> Duration {
        Duration::from_secs(self.rotation_rate.max(1))
    }

    fn normalized(mut self) -> Self {
        self.preferred_teams = self
            .preferred_teams
            .into_iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_refresh_rate(), Duration::from_secs(15));
    }

    #[test]
    fn teams_are_normalized() {
        let config =
            Config::from_json(r#"{ "preferred_teams": [" wpg", "BC", ""], "rotation_only_preferred": true }"#)
                .unwrap();
        assert_eq!(config.preferred_teams, vec!["WPG", "BC"]);
        assert!(config.rotation_only_preferred);
        assert!(config.rotation_enabled);
    }

    #[test]
    fn log_level_parses() {
        let config = Config::from_json(r#"{ "log_level": "DEBUG", "data_refresh_rate": 30 }"#).unwrap();
        assert_eq!(config.log_level, Some(LevelFilter::Debug));
        assert_eq!(config.data_refresh_rate, 30);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ preferred_teams: ").is_err());
        assert!(Config::from_json(r#"{ "data_refresh_rate": -1 }"#).is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::from_path("/nonexistent/cflboard/config.json").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rotation_rate_is_never_zero() {
        let config = Config { rotation_rate: 0, ..Config::default() };
        assert_eq!(config.rotation_rate(), Duration::from_secs(1));
    }
}
