use agro_core::Granularity;
use chrono::{DateTime, Datelike, TimeZone, Timelike};

const HOUR_MS: i64 = 3_600 * 1_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Oldest age (in ms) a point may have to be bucketed at `granularity`.
///
/// `None` for monthly, which filters by calendar year instead of age.
pub fn max_age_ms(granularity: Granularity) -> Option<i64> {
    match granularity {
        Granularity::Hourly  => Some(24 * HOUR_MS),
        Granularity::Daily   => Some(30 * DAY_MS),
        Granularity::Weekly  => Some(12 * 7 * DAY_MS),
        Granularity::Monthly => None,
    }
}

/// Whether a point taken at `at` falls inside the window for `granularity`.
///
/// Ages are signed, so points stamped after `now` are always inside.
pub fn in_window<Tz: TimeZone>(
    granularity: Granularity,
    at: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> bool {
    match max_age_ms(granularity) {
        Some(max) => now.timestamp_millis() - at.timestamp_millis() <= max,
        None      => now.year() - at.year() <= 1,
    }
}

/// Bucket label for a point taken at `at`.
///
/// Month names are always English abbreviations (`"Jan"`..`"Dec"`).
pub fn label<Tz: TimeZone>(granularity: Granularity, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match granularity {
        Granularity::Hourly  => format!("{:02}:00", at.hour()),
        Granularity::Daily   => format!("{}/{}", at.day(), at.month()),
        Granularity::Weekly  => format!("W{}", at.day().div_ceil(7)),
        Granularity::Monthly => at.format("%b").to_string(),
    }
}

/// Bucket key for the point stamped `timestamp_ms`, or `None` when it is
/// outside the window or not a representable instant.
pub fn key_for<Tz: TimeZone>(
    granularity: Granularity,
    timestamp_ms: i64,
    now: &DateTime<Tz>,
) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let at = now.timezone().timestamp_millis_opt(timestamp_ms).single()?;
    in_window(granularity, &at, now).then(|| label(granularity, &at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn hourly_label_is_zero_padded() {
        assert_eq!(label(Granularity::Hourly, &at(2025, 11, 5, 8, 30)), "08:00");
        assert_eq!(label(Granularity::Hourly, &at(2025, 11, 5, 14, 0)), "14:00");
    }

    #[test]
    fn daily_label_is_day_slash_month() {
        assert_eq!(label(Granularity::Daily, &at(2025, 11, 5, 8, 0)), "5/11");
        assert_eq!(label(Granularity::Daily, &at(2025, 1, 31, 8, 0)), "31/1");
    }

    #[test]
    fn weekly_label_uses_week_of_month() {
        assert_eq!(label(Granularity::Weekly, &at(2025, 3, 1, 0, 0)), "W1");
        assert_eq!(label(Granularity::Weekly, &at(2025, 3, 7, 0, 0)), "W1");
        assert_eq!(label(Granularity::Weekly, &at(2025, 3, 8, 0, 0)), "W2");
        assert_eq!(label(Granularity::Weekly, &at(2025, 3, 29, 0, 0)), "W5");
    }

    #[test]
    fn monthly_label_is_english_short_month() {
        assert_eq!(label(Granularity::Monthly, &at(2025, 2, 10, 0, 0)), "Feb");
        assert_eq!(label(Granularity::Monthly, &at(2025, 12, 10, 0, 0)), "Dec");
    }

    #[test]
    fn window_edges() {
        let now = at(2025, 6, 15, 12, 0);
        let hourly_edge = now - Duration::hours(24);
        assert!(in_window(Granularity::Hourly, &hourly_edge, &now));
        assert!(!in_window(Granularity::Hourly, &(hourly_edge - Duration::milliseconds(1)), &now));

        let daily_edge = now - Duration::days(30);
        assert!(in_window(Granularity::Daily, &daily_edge, &now));
        assert!(!in_window(Granularity::Daily, &(daily_edge - Duration::seconds(1)), &now));

        assert!(in_window(Granularity::Weekly, &(now - Duration::weeks(12)), &now));
        assert!(!in_window(Granularity::Weekly, &(now - Duration::weeks(13)), &now));
    }

    #[test]
    fn monthly_window_is_by_calendar_year() {
        let now = at(2025, 1, 2, 0, 0);
        assert!(in_window(Granularity::Monthly, &at(2024, 1, 1, 0, 0), &now));
        assert!(!in_window(Granularity::Monthly, &at(2023, 12, 31, 23, 59), &now));
    }

    #[test]
    fn future_points_are_inside_every_window() {
        let now = at(2025, 6, 15, 12, 0);
        let later = now + Duration::days(400);
        for g in Granularity::ALL {
            assert!(in_window(g, &later, &now), "{g}");
        }
    }

    #[test]
    fn key_uses_the_zone_of_now() {
        let offset = chrono::FixedOffset::east_opt(7 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 1, 0, 0).unwrap().timestamp_millis();
        assert_eq!(key_for(Granularity::Hourly, ts, &now).as_deref(), Some("08:00"));
    }

    #[test]
    fn key_is_none_outside_the_window() {
        let now = at(2025, 6, 15, 12, 0);
        let ts = (now - Duration::hours(25)).timestamp_millis();
        assert_eq!(key_for(Granularity::Hourly, ts, &now), None);
        assert_eq!(key_for(Granularity::Daily, ts, &now).as_deref(), Some("14/6"));
    }
}
