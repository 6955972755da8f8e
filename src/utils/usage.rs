use chrono::{DateTime, Local, TimeZone};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Unix timestamp of the most recent local midnight before `now`.
pub(crate) fn midnight_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let midnight = now.date_naive().and_time(chrono::NaiveTime::default());

    // a DST jump can skip or repeat midnight; take the earliest valid instant
    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(instant) => instant.timestamp(),
        None => midnight.and_utc().timestamp(),
    }
}

pub(crate) fn today_midnight_timestamp() -> i64 {
    midnight_timestamp(&Local::now())
}

#[derive(Debug, Default)]
struct Window {
    day: i64,
    used: u32,
}

/// Counts accepted like calls per local calendar day.
#[derive(Clone, Debug)]
pub(crate) struct UsageTracker {
    limit: u32,
    window: Arc<Mutex<Window>>,
}

impl UsageTracker {
    /// A `limit` of 0 means unlimited.
    pub(crate) fn new(limit: u32) -> Self {
        Self {
            limit,
            window: Arc::new(Mutex::new(Window::default())),
        }
    }

    pub(crate) async fn try_acquire(&self) -> bool {
        self.try_acquire_on(today_midnight_timestamp()).await
    }

    pub(crate) async fn try_acquire_on(&self, day: i64) -> bool {
        let mut window = self.window.lock().await;

        if window.day != day {
            *window = Window { day, used: 0 };
        }

        if self.limit > 0 && window.used >= self.limit {
            return false;
        }

        window.used += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_midnight_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 12).unwrap();
        assert_eq!(
            midnight_timestamp(&now),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap().timestamp()
        );

        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 9, 0, 10, 0).unwrap();
        assert_eq!(
            midnight_timestamp(&now),
            Utc.with_ymd_and_hms(2024, 3, 8, 18, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_today_is_not_in_the_future() {
        assert!(today_midnight_timestamp() <= Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_limit_resets_at_midnight() {
        let tracker = UsageTracker::new(2);

        assert!(tracker.try_acquire_on(100).await);
        assert!(tracker.try_acquire_on(100).await);
        assert!(!tracker.try_acquire_on(100).await);

        assert!(tracker.try_acquire_on(86_500).await);
    }

    #[tokio::test]
    async fn test_zero_limit_is_unlimited() {
        let tracker = UsageTracker::new(0);
        for _ in 0..500 {
            assert!(tracker.try_acquire_on(1).await);
        }
    }
}
