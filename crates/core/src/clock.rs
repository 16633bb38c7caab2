use chrono::{NaiveDate, Utc};

/// Date source injected into the batch layer so evaluation never reads
/// ambient time. Date granularity only; time of day is irrelevant to
/// expiry rules.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock: the current UTC calendar date.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Pins "today" to a known date. Used by tests and diagnostics that need
/// reproducible expiry arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Clock, FixedClock};

    #[test]
    fn fixed_clock_returns_the_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("date");
        assert_eq!(FixedClock::new(date).today(), date);
    }
}
