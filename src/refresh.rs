use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::rotation::RotationSelector;
use crate::state::RotationState;
use cfl_api::{ApiResult, Game, GameDataProvider, GameList, NETWORK_RETRY_SLEEP_TIME};
use chrono::TimeDelta;
use log::{debug, error, info, warn};
use std::time::Duration;

/// Provider attempts per `refresh` call before giving up.
pub const MAX_REFRESH_ATTEMPTS: u32 = 5;

/// What a single provider call brought back.
#[derive(Debug)]
enum Fetched {
    Games(GameList),
    Overview(Game),
}

/// Keeps the board's games fresh without polling the provider faster than
/// `data_refresh_rate`, retrying failed calls and rotating past games that
/// can't be fetched.
///
/// Every call blocks the current thread: rate-limit waits and retry delays
/// are slept through on the caller's thread.
pub struct RefreshController<P, C = SystemClock> {
    config: Config,
    provider: P,
    clock: C,
    selector: RotationSelector,
    state: RotationState,
}

impl<P: GameDataProvider, C: Clock> RefreshController<P, C> {
    pub fn new(config: Config, provider: P, clock: C) -> Self {
        Self {
            selector: RotationSelector::new(&config),
            state: RotationState::new(),
            config,
            provider,
            clock,
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.state.current_game()
    }

    /// Ask the caller's loop to refresh the full list at its next opportunity.
    pub fn request_refresh(&mut self) {
        self.state.needs_refresh = true;
    }

    pub fn showing_preferred_game(&self) -> bool {
        self.selector.showing_preferred_game(&self.state)
    }

    pub fn should_advance(&self) -> bool {
        self.selector.should_advance(&self.state)
    }

    pub fn advance_to_next_game(&mut self) {
        self.selector.advance_to_next_game(&mut self.state);
    }

    /// Refresh the full game list (`None`) or one game's overview in place.
    ///
    /// Never fails: after `MAX_REFRESH_ATTEMPTS` failed calls `network_issues`
    /// stays set, and the rotation moves on if it is enabled.
    pub fn refresh(&mut self, game_id: Option<&str>) {
        match game_id {
            None => info!("Refreshing list of games"),
            Some(id) => debug!("Refreshing game overview - ID: {id}"),
        }

        self.wait_for_rate_limit(game_id.is_some());

        let mut attempts_remaining = MAX_REFRESH_ATTEMPTS;
        while attempts_remaining > 0 {
            match self.fetch(game_id) {
                Ok(fetched) => {
                    self.apply(fetched);
                    return;
                }
                Err(e) => {
                    self.state.network_issues = true;
                    attempts_remaining -= 1;
                    match game_id {
                        None => error!(
                            "Error refreshing master list of games. {attempts_remaining} retries remaining."
                        ),
                        Some(id) => error!(
                            "Error refreshing single game overview - ID: {id}. {attempts_remaining} retries remaining."
                        ),
                    }
                    error!("Error(s): {e}");
                    self.clock.sleep(NETWORK_RETRY_SLEEP_TIME);
                }
            }
        }

        if self.config.rotation_enabled {
            warn!("Out of retries, moving on to the next game");
            self.advance_to_next_game();
        } else {
            warn!("Out of retries, keeping stale games");
        }
    }

    /// Re-check the current season and week. The check is stamped even when
    /// it fails, so an outage costs at most one season call per day.
    pub fn refresh_season(&mut self) {
        self.state.time_since_day_refresh = self.clock.now();
        match self.provider.get_current_season() {
            Ok(season) => {
                info!(
                    "Season {} week {}{}",
                    season.year,
                    season.week,
                    if season.preseason { " (preseason)" } else { "" }
                );
                self.state.season = Some(season);
            }
            Err(e) => warn!("Could not refresh season info: {e}"),
        }
    }

    fn fetch(&self, game_id: Option<&str>) -> ApiResult<Fetched> {
        match game_id {
            None => self.provider.get_all_games().map(Fetched::Games),
            Some(id) => self.provider.get_overview(id).map(Fetched::Overview),
        }
    }

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Games(all_games) => {
                let games = if self.config.rotation_only_preferred
                    && !self.config.preferred_teams.is_empty()
                {
                    info!("Filtering games for preferred team - {:?}", self.config.preferred_teams);
                    self.selector
                        .filter(&self.state, all_games, &self.config.preferred_teams)
                } else {
                    all_games
                };
                debug!("Stored {} games", games.len());
                self.state.replace_games(games);
            }
            Fetched::Overview(game) => {
                self.state.replace_current_game(game);
                self.state.first_refresh = false;
            }
        }

        self.state.games_refresh_time = self.clock.now();
        self.state.needs_refresh = false;
        self.state.network_issues = false;
    }

    fn elapsed_since_refresh(&self) -> Duration {
        (self.clock.now() - self.state.games_refresh_time)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    fn day_rollover_due(&self) -> bool {
        self.clock.now() - self.state.time_since_day_refresh > TimeDelta::days(1)
    }

    fn wait_for_rate_limit(&mut self, single_game: bool) {
        if single_game && self.state.first_refresh {
            return;
        }

        let rate = self.config.data_refresh_rate();
        if self.elapsed_since_refresh() >= rate {
            return;
        }

        if self.day_rollover_due() {
            debug!("Day rolled over, re-checking season");
            self.refresh_season();
        }

        let remaining = rate.saturating_sub(self.elapsed_since_refresh());
        if !remaining.is_zero() {
            info!("Rate limited, waiting {:.1}s before refreshing", remaining.as_secs_f32());
            self.clock.sleep(remaining);
        }
    }
}
