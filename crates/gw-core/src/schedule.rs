//! Daily trigger arithmetic.
//!
//! The two scheduled jobs fire at fixed UTC wall-clock times. This module
//! only computes fire times; sleeping until them is the service's job.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

/// A trigger that fires once per day at a fixed UTC time, optionally
/// restricted to a subset of weekdays.
#[derive(Debug, Clone)]
pub struct DailyTrigger {
    /// Wall-clock fire time (UTC).
    pub at: NaiveTime,
    /// Weekday filter; `None` fires every day.
    pub weekdays: Option<&'static [Weekday]>,
}

impl DailyTrigger {
    /// A trigger firing every day at `hour:minute` UTC.
    #[must_use]
    pub fn daily(hour: u32, minute: u32) -> Self {
        Self {
            at: NaiveTime::from_hms_opt(hour, minute, 0).expect("valid trigger time"),
            weekdays: None,
        }
    }

    /// A trigger firing at `hour:minute` UTC on the given weekdays only.
    #[must_use]
    pub fn on_weekdays(hour: u32, minute: u32, weekdays: &'static [Weekday]) -> Self {
        Self {
            weekdays: Some(weekdays),
            ..Self::daily(hour, minute)
        }
    }

    /// Whether the trigger fires on the given weekday.
    #[must_use]
    pub fn fires_on(&self, weekday: Weekday) -> bool {
        self.weekdays.is_none_or(|days| days.contains(&weekday))
    }

    /// The next fire time strictly after `now`.
    #[must_use]
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut date = now.date_naive();
        let mut candidate = date.and_time(self.at).and_utc();
        if candidate <= now {
            date += Duration::days(1);
            candidate = date.and_time(self.at).and_utc();
        }
        // A non-empty weekday subset repeats within a week.
        while !self.fires_on(candidate.weekday()) {
            date += Duration::days(1);
            candidate = date.and_time(self.at).and_utc();
        }
        candidate
    }
}

/// The morning reminder: 02:59 UTC, Sunday through Thursday.
#[must_use]
pub fn reminder_trigger() -> DailyTrigger {
    DailyTrigger::on_weekdays(
        2,
        59,
        &[
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
        ],
    )
}

/// The nightly stats report: 21:00 UTC, every day.
#[must_use]
pub fn stats_trigger() -> DailyTrigger {
    DailyTrigger::daily(21, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2026-08-06 is a Thursday.
    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn daily_trigger_fires_later_today() {
        let trigger = DailyTrigger::daily(21, 0);
        assert_eq!(trigger.next_fire_after(at(6, 9, 0)), at(6, 21, 0));
    }

    #[test]
    fn daily_trigger_rolls_to_tomorrow_after_fire_time() {
        let trigger = DailyTrigger::daily(21, 0);
        assert_eq!(trigger.next_fire_after(at(6, 21, 30)), at(7, 21, 0));
    }

    #[test]
    fn fire_time_itself_rolls_forward() {
        // "Strictly after": asking at the fire instant yields tomorrow,
        // so a job that just ran cannot immediately re-trigger.
        let trigger = DailyTrigger::daily(21, 0);
        assert_eq!(trigger.next_fire_after(at(6, 21, 0)), at(7, 21, 0));
    }

    #[test]
    fn weekday_subset_skips_excluded_days() {
        // Friday Aug 7 and Saturday Aug 8 are skipped; next fire is
        // Sunday Aug 9.
        let trigger = reminder_trigger();
        assert_eq!(trigger.next_fire_after(at(6, 12, 0)), at(9, 2, 59));
    }

    #[test]
    fn weekday_subset_fires_on_included_day() {
        // Wednesday night rolls to Thursday morning (included).
        let trigger = reminder_trigger();
        assert_eq!(trigger.next_fire_after(at(5, 12, 0)), at(6, 2, 59));
    }

    #[test]
    fn reminder_weekday_filter() {
        let trigger = reminder_trigger();
        assert!(trigger.fires_on(Weekday::Sun));
        assert!(trigger.fires_on(Weekday::Thu));
        assert!(!trigger.fires_on(Weekday::Fri));
        assert!(!trigger.fires_on(Weekday::Sat));
    }

    #[test]
    fn stats_trigger_fires_every_day() {
        let trigger = stats_trigger();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(trigger.fires_on(weekday));
        }
    }
}
