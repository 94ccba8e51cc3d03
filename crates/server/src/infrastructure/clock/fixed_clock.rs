use crate::domain::Clock;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Manually driven clock for tests and demos
///
/// Time only moves through `set` / `advance`. Clones share the same time.
#[derive(Debug)]
pub struct FixedClock {
    inner: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(time: DateTime<Utc>) -> Self {
        FixedClock {
            inner: Arc::new(RwLock::new(time)),
        }
    }

    /// Noon UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self::at(date.and_time(noon).and_utc())
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.inner.write() = time;
    }

    pub fn advance(&self, duration: Duration) {
        let mut time = self.inner.write();
        *time += duration;
    }
}

impl Clone for FixedClock {
    fn clone(&self) -> Self {
        FixedClock {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_only_moves_when_told() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);

        let shared = clock.clone();
        clock.advance(Duration::hours(13));
        assert_eq!(shared.today(), date.succ_opt().unwrap());
    }
}
