use cfl_api::CflApi;
use cflboard::{Config, RefreshController, SystemClock};
use log::debug;
use std::time::Instant;

/// Overview polls of a live game between two full-list refreshes.
const OVERVIEW_POLLS_PER_FULL_REFRESH: u32 = 4;

/// The render loop's view of the board: the refresh controller plus the
/// viewer's own rotation and polling timers.
pub struct App {
    pub controller: RefreshController<CflApi, SystemClock>,
    pub show_logs: bool,
    last_attempt: Option<Instant>,
    last_rotation: Instant,
    overview_polls: u32,
}

impl App {
    pub fn new(config: Config, api: CflApi) -> Self {
        Self {
            controller: RefreshController::new(config, api, SystemClock),
            show_logs: true,
            last_attempt: None,
            last_rotation: Instant::now(),
            overview_polls: 0,
        }
    }

    pub fn start(&mut self) {
        self.controller.refresh_season();
        self.refresh_data();
    }

    /// One pass of the loop: rotate if the current game has been up long
    /// enough, then poll the provider if the refresh rate allows it.
    pub fn tick(&mut self) {
        if self.last_rotation.elapsed() >= self.controller.config().rotation_rate() {
            if self.controller.should_advance() {
                self.controller.advance_to_next_game();
            }
            self.last_rotation = Instant::now();
        }

        if self.data_due() {
            self.refresh_data();
        }
    }

    pub fn next_game(&mut self) {
        self.controller.advance_to_next_game();
        self.last_rotation = Instant::now();
    }

    /// Make the next poll pull the full list. The poll still waits for the
    /// refresh rate, so the loop never sleeps inside the controller.
    pub fn force_refresh(&mut self) {
        self.controller.request_refresh();
    }

    pub fn toggle_show_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    fn data_due(&self) -> bool {
        self.last_attempt
            .is_none_or(|t| t.elapsed() >= self.controller.config().data_refresh_rate())
    }

    fn refresh_data(&mut self) {
        let live_id = self
            .controller
            .current_game()
            .filter(|g| g.is_live())
            .map(|g| g.id.clone());

        match overview_target(live_id, self.controller.state().needs_refresh(), self.overview_polls) {
            Some(id) => {
                debug!("polling live game {id}");
                self.overview_polls += 1;
                self.controller.refresh(Some(&id));
            }
            None => {
                self.overview_polls = 0;
                self.controller.refresh(None);
            }
        }
        self.last_attempt = Some(Instant::now());
    }
}

/// Live games only need their own overview, but the full list still comes
/// through every few polls so the other scores keep moving. `None` means
/// pull the full list.
fn overview_target(live_id: Option<String>, needs_refresh: bool, overview_polls: u32) -> Option<String> {
    if needs_refresh || overview_polls >= OVERVIEW_POLLS_PER_FULL_REFRESH {
        return None;
    }
    live_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default(), CflApi::new(None))
    }

    #[test]
    fn force_refresh_keeps_the_poll_gate() {
        let mut app = app();
        app.last_attempt = Some(Instant::now());

        app.force_refresh();

        assert!(app.last_attempt.is_some());
        assert!(!app.data_due());
        assert!(app.controller.state().needs_refresh());
    }

    #[test]
    fn first_poll_is_due_immediately() {
        assert!(app().data_due());
    }

    #[test]
    fn live_game_polls_overview_then_full_list() {
        let id = || Some("42".to_owned());
        for polls in 0..OVERVIEW_POLLS_PER_FULL_REFRESH {
            assert_eq!(overview_target(id(), false, polls).as_deref(), Some("42"));
        }
        assert_eq!(overview_target(id(), false, OVERVIEW_POLLS_PER_FULL_REFRESH), None);
    }

    #[test]
    fn pending_refresh_or_no_live_game_pulls_full_list() {
        assert_eq!(overview_target(Some("42".into()), true, 0), None);
        assert_eq!(overview_target(None, false, 0), None);
    }
}
