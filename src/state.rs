use cfl_api::{Game, GameList, Season};
use chrono::{DateTime, Utc};

/// Live board state, owned by a `RefreshController`.
///
/// Callers only read it; timing fields, `games` and the flags are written by
/// the controller and `current_game_index` by the `RotationSelector`.
#[derive(Debug, Clone)]
pub struct RotationState {
    pub(crate) games: GameList,
    /// Valid index into `games` whenever `games` is non-empty.
    pub(crate) current_game_index: usize,
    /// Last successful provider call; epoch until the first one.
    pub(crate) games_refresh_time: DateTime<Utc>,
    /// Last season/week re-check; epoch until the first one.
    pub(crate) time_since_day_refresh: DateTime<Utc>,
    pub(crate) needs_refresh: bool,
    pub(crate) network_issues: bool,
    pub(crate) first_refresh: bool,
    pub(crate) season: Option<Season>,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            games: Vec::new(),
            current_game_index: 0,
            games_refresh_time: DateTime::<Utc>::UNIX_EPOCH,
            time_since_day_refresh: DateTime::<Utc>::UNIX_EPOCH,
            needs_refresh: true,
            network_issues: false,
            first_refresh: true,
            season: None,
        }
    }
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn current_game_index(&self) -> usize {
        self.current_game_index
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.games.get(self.current_game_index)
    }

    pub fn games_refresh_time(&self) -> DateTime<Utc> {
        self.games_refresh_time
    }

    pub fn time_since_day_refresh(&self) -> DateTime<Utc> {
        self.time_since_day_refresh
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn network_issues(&self) -> bool {
        self.network_issues
    }

    pub fn first_refresh(&self) -> bool {
        self.first_refresh
    }

    pub fn season(&self) -> Option<Season> {
        self.season
    }

    /// Install a freshly fetched list, wrapping the index back into range.
    pub(crate) fn replace_games(&mut self, games: GameList) {
        self.games = games;
        if self.games.is_empty() {
            self.current_game_index = 0;
        } else {
            self.current_game_index %= self.games.len();
        }
    }

    /// Swap in a refreshed record for the game on screen.
    pub(crate) fn replace_current_game(&mut self, game: Game) {
        match self.games.get_mut(self.current_game_index) {
            Some(slot) => *slot = game,
            None => self.replace_games(vec![game]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str) -> Game {
        Game { id: id.into(), ..Default::default() }
    }

    #[test]
    fn new_state_is_empty_and_pending() {
        let state = RotationState::new();
        assert!(state.games().is_empty());
        assert_eq!(state.current_game_index(), 0);
        assert!(state.current_game().is_none());
        assert!(state.needs_refresh());
        assert!(state.first_refresh());
        assert!(!state.network_issues());
        assert_eq!(state.games_refresh_time(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn replacing_with_shorter_list_wraps_index() {
        let mut state = RotationState::new();
        state.replace_games(vec![game("1"), game("2"), game("3"), game("4")]);
        state.current_game_index = 3;
        state.replace_games(vec![game("5"), game("6")]);
        assert_eq!(state.current_game_index(), 1);
        assert_eq!(state.current_game().unwrap().id, "6");

        state.replace_games(Vec::new());
        assert_eq!(state.current_game_index(), 0);
    }

    #[test]
    fn replace_current_game_updates_in_place() {
        let mut state = RotationState::new();
        state.replace_games(vec![game("1"), game("2")]);
        state.current_game_index = 1;
        let mut updated = game("2");
        updated.home_score = 14;
        state.replace_current_game(updated);
        assert_eq!(state.games().len(), 2);
        assert_eq!(state.games()[1].home_score, 14);
    }

    #[test]
    fn replace_current_game_on_empty_list_stores_it() {
        let mut state = RotationState::new();
        state.replace_current_game(game("9"));
        assert_eq!(state.games().len(), 1);
        assert_eq!(state.current_game().unwrap().id, "9");
    }
}
