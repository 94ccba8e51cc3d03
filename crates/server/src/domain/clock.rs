use chrono::{DateTime, NaiveDate, Utc};

/// Basic clock trait - provides current time
///
/// Journal dates (account creation, analytics windows, token expiry) all
/// come from a clock so tests can pin "today".
pub trait Clock: Send + Sync {
    /// Get current time from this clock's perspective
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
