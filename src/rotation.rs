use crate::config::Config;
use crate::state::RotationState;
use cfl_api::{Game, GameList};
use log::{debug, info};

/// Decides which game is on screen and which games the rotation cycles through.
#[derive(Debug, Clone, Default)]
pub struct RotationSelector {
    preferred_teams: Vec<String>,
    rotation_enabled: bool,
    preferred_team_live_enabled: bool,
    preferred_team_live_halftime: bool,
}

impl RotationSelector {
    pub fn new(config: &Config) -> Self {
        Self {
            preferred_teams: config.preferred_teams.clone(),
            rotation_enabled: config.rotation_enabled,
            preferred_team_live_enabled: config.rotation_preferred_team_live_enabled,
            preferred_team_live_halftime: config.rotation_preferred_team_live_halftime,
        }
    }

    /// Narrow `games` to those involving `teams`, keeping provider order.
    ///
    /// The full list is returned untouched while a preferred team is live (or
    /// at halftime, when enabled), and whenever narrowing would leave nothing
    /// to show.
    pub fn filter(&self, state: &RotationState, games: GameList, teams: &[String]) -> GameList {
        if self.preferred_team_live_enabled && self.showing_preferred_game(state) {
            debug!("preferred team is live, keeping all {} games", games.len());
            return games;
        }

        if self.preferred_team_live_halftime && self.showing_preferred_halftime(state) {
            debug!("preferred team at halftime, keeping all {} games", games.len());
            return games;
        }

        if !games.iter().any(|g| g.involves(teams)) {
            return games;
        }
        games.into_iter().filter(|g| g.involves(teams)).collect()
    }

    /// True when the game on screen is live and features a preferred team.
    pub fn showing_preferred_game(&self, state: &RotationState) -> bool {
        let showing = state
            .current_game()
            .is_some_and(|g| g.is_live() && g.involves(&self.preferred_teams));
        debug!(
            "showing_preferred_game = {showing} {}",
            if showing { "(Live)" } else { "(Not Live)" }
        );
        showing
    }

    fn showing_preferred_halftime(&self, state: &RotationState) -> bool {
        state
            .current_game()
            .is_some_and(|g| g.is_halftime() && g.involves(&self.preferred_teams))
    }

    /// Step to the next game, wrapping to the first after the last.
    pub fn advance_to_next_game(&self, state: &mut RotationState) {
        let len = state.games.len();
        if len == 0 {
            return;
        }
        state.current_game_index = (state.current_game_index + 1) % len;
        info!(
            "Advancing to next game ({}/{len}): {}",
            state.current_game_index + 1,
            state.games.get(state.current_game_index).map(Game::to_string).unwrap_or_default()
        );
    }

    /// Whether a rotation tick should move off the current game. A live
    /// preferred game stays pinned when live tracking is on.
    pub fn should_advance(&self, state: &RotationState) -> bool {
        self.rotation_enabled
            && !(self.preferred_team_live_enabled && self.showing_preferred_game(state))
    }
}
