use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Reported boot times closer than this to the previous one are treated as jitter.
pub const UPTIME_FLUCTUATION: TimeDelta = TimeDelta::seconds(5);

/// Converts `sysUpTime` ticks into a stable boot timestamp.
///
/// Boot time is derived from "now minus uptime", so every poll lands a little
/// off. Small drifts keep the previous value; a reboot moves it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UptimeTracker {
    last: Option<DateTime<Utc>>,
}

impl UptimeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.last
    }

    /// Feed one reading of hundredths of a second since boot.
    ///
    /// Returns `None` and keeps the previous boot time when the reading puts
    /// the boot time outside the representable date range.
    pub fn observe(&mut self, ticks: u64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(ticks.saturating_mul(10)).ok()?;
        let boot = now.checked_sub_signed(TimeDelta::try_milliseconds(millis)?)?.trunc_subsecs(0);

        let stable = match self.last {
            Some(last) if (boot - last).abs() <= UPTIME_FLUCTUATION => last,
            _ => boot,
        };
        self.last = Some(stable);
        Some(stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 3, h, m, s).unwrap()
    }

    #[test]
    fn test_first_observation_is_now_minus_uptime() {
        let mut tracker = UptimeTracker::new();
        // 1 hour of ticks
        let boot = tracker.observe(360_000, at(12, 0, 0)).unwrap();
        assert_eq!(boot, at(11, 0, 0));
        assert_eq!(tracker.last(), Some(at(11, 0, 0)));
    }

    #[test]
    fn test_sub_second_part_is_dropped() {
        let mut tracker = UptimeTracker::new();
        let now = at(12, 0, 0) + TimeDelta::milliseconds(730);
        assert_eq!(tracker.observe(0, now), Some(at(12, 0, 0)));
    }

    #[test]
    fn test_small_drift_keeps_previous_boot_time() {
        let mut tracker = UptimeTracker::new();
        tracker.observe(360_000, at(12, 0, 0));
        // 60 s later the printer reports 57 s more uptime: 3 s of jitter
        let boot = tracker.observe(365_700, at(12, 1, 0)).unwrap();
        assert_eq!(boot, at(11, 0, 0));
        // exactly at the threshold still counts as jitter
        let boot = tracker.observe(366_000 - 500, at(12, 1, 0)).unwrap();
        assert_eq!(boot, at(11, 0, 0));
    }

    #[test]
    fn test_reboot_moves_boot_time() {
        let mut tracker = UptimeTracker::new();
        tracker.observe(360_000, at(12, 0, 0));
        let boot = tracker.observe(1_000, at(12, 30, 0)).unwrap();
        assert_eq!(boot, at(12, 29, 50));
        assert_eq!(tracker.last(), Some(at(12, 29, 50)));
    }

    #[test]
    fn test_out_of_range_uptime_is_ignored() {
        let mut tracker = UptimeTracker::new();
        tracker.observe(360_000, at(12, 0, 0));

        assert_eq!(tracker.observe(u64::MAX, at(12, 1, 0)), None);
        // about 2.9 million years of ticks, before the earliest representable date
        assert_eq!(tracker.observe(u64::MAX / 2_000, at(12, 1, 0)), None);
        assert_eq!(tracker.last(), Some(at(11, 0, 0)));
    }
}
