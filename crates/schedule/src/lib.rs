//! Watering schedules: the list, the edit form, and the reducer that drives
//! both.

pub mod form;
pub mod reducer;

pub use form::{ScheduleForm, DURATION_OPTIONS};
pub use reducer::{ScheduleAction, ScheduleState};

use agro_core::WateringSchedule;
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Weekday};

/// Weekdays in display order (the week starts on Monday).
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse `"mon"`, `"Monday"` etc.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

/// Parse an `HH:MM` start time.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// A schedule's next start.
#[derive(Debug, Clone, PartialEq)]
pub struct Upcoming<'a, Tz: TimeZone> {
    pub schedule: &'a WateringSchedule,
    pub at: DateTime<Tz>,
}

/// The soonest start, at or after `now`, among active schedules.
///
/// Looks one week ahead; schedules without days never match.
pub fn next_due<'a, Tz: TimeZone>(
    schedules: &'a [WateringSchedule],
    now: &DateTime<Tz>,
) -> Option<Upcoming<'a, Tz>> {
    let today = now.date_naive();

    schedules
        .iter()
        .filter(|s| s.active)
        .filter_map(|s| {
            (0..=7)
                .map(|offset| today + Duration::days(offset))
                .filter(|day| s.days.contains(&day.weekday()))
                .filter_map(|day| {
                    now.timezone()
                        .from_local_datetime(&day.and_time(s.time))
                        .earliest()
                })
                .find(|at| at >= now)
                .map(|at| Upcoming { schedule: s, at })
        })
        .min_by_key(|u| u.at.timestamp())
}

/// Schedules shipped with a fresh install.
pub fn default_schedules() -> Vec<WateringSchedule> {
    vec![
        WateringSchedule {
            id: 1,
            zone: agro_core::Zone::Greenhouse,
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
            duration_minutes: 15,
            active: true,
            notes: Some("Water the front beds only".to_string()),
        },
        WateringSchedule {
            id: 2,
            zone: agro_core::Zone::Field,
            time: NaiveTime::from_hms_opt(16, 30, 0).unwrap_or_default(),
            days: vec![Weekday::Tue, Weekday::Thu],
            duration_minutes: 30,
            active: false,
            notes: Some("Use liquid fertilizer".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // 2025-11-05 is a Wednesday.
    fn wed(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 5, h, m, 0).unwrap()
    }

    #[test]
    fn next_due_today_when_still_ahead() {
        let schedules = default_schedules();
        let next = next_due(&schedules, &wed(7, 0)).unwrap();
        assert_eq!(next.schedule.id, 1);
        assert_eq!(next.at, wed(8, 0));
    }

    #[test]
    fn next_due_skips_to_following_day() {
        let schedules = default_schedules();
        let next = next_due(&schedules, &wed(9, 0)).unwrap();
        assert_eq!(next.at, Utc.with_ymd_and_hms(2025, 11, 7, 8, 0, 0).unwrap());
    }

    #[test]
    fn inactive_schedules_are_ignored() {
        let mut schedules = default_schedules();
        schedules[0].active = false;
        assert!(next_due(&schedules, &wed(9, 0)).is_none());

        schedules[1].active = true;
        let next = next_due(&schedules, &wed(9, 0)).unwrap();
        assert_eq!(next.schedule.id, 2);
        assert_eq!(next.at, Utc.with_ymd_and_hms(2025, 11, 6, 16, 30, 0).unwrap());
    }

    #[test]
    fn same_day_next_week() {
        let mut schedules = default_schedules();
        schedules[0].days = vec![Weekday::Wed];
        let next = next_due(&schedules[..1], &wed(9, 0)).unwrap();
        assert_eq!(next.at, Utc.with_ymd_and_hms(2025, 11, 12, 8, 0, 0).unwrap());
    }

    #[test]
    fn parses_days_and_times() {
        assert_eq!(parse_weekday("mon"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Sunday"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("funday"), None);
        assert_eq!(parse_time("06:45"), NaiveTime::from_hms_opt(6, 45, 0));
        assert_eq!(parse_time("6pm"), None);
    }
}
