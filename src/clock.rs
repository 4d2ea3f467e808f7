use chrono::{DateTime, Utc};
use std::time::Duration;

/// Time source for the refresh loop. `sleep` blocks the calling thread.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for tests: sleeping advances `now` instantly and is recorded.
#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    #[derive(Debug)]
    pub struct FakeClock {
        now: Cell<DateTime<Utc>>,
        pub sleeps: RefCell<Vec<Duration>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                now: Cell::new(Utc.with_ymd_and_hms(2024, 7, 1, 19, 0, 0).unwrap()),
                sleeps: RefCell::new(Vec::new()),
            }
        }

        pub fn advance(&self, duration: Duration) {
            let delta = TimeDelta::from_std(duration).unwrap();
            self.now.set(self.now.get() + delta);
        }

        pub fn total_slept(&self) -> Duration {
            self.sleeps.borrow().iter().sum()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.advance(duration);
        }
    }
}
