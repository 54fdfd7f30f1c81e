//! Clock abstraction so the last-generation label can be pinned in tests.

use chrono::{DateTime, Local};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Wall-clock `HH:MM` shown as the last generation time.
    fn time_label(&self) -> String {
        self.now().format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::TimeZone;

    /// A clock that always returns the same local time.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub DateTime<Local>);

    impl FixedClock {
        pub fn at(hour: u32, minute: u32) -> Self {
            let time = Local
                .with_ymd_and_hms(2024, 3, 9, hour, minute, 0)
                .earliest()
                .expect("valid local time");
            Self(time)
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    #[test]
    fn test_time_label_is_zero_padded() {
        assert_eq!(FixedClock::at(7, 5).time_label(), "07:05");
        assert_eq!(FixedClock::at(23, 59).time_label(), "23:59");
    }
}
