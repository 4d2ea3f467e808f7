//! Live state of a rotating CFL scoreboard: rate-limited refreshes with a
//! bounded retry budget, and the rotation that decides which game is shown.

pub mod clock;
pub mod config;
pub mod refresh;
pub mod rotation;
pub mod state;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use refresh::{MAX_REFRESH_ATTEMPTS, RefreshController};
pub use rotation::RotationSelector;
pub use state::RotationState;
