use agro_core::{AggregatedSeries, Granularity, RawPoint};
use chrono::{DateTime, TimeZone};
use tracing::trace;

/// Memoizes the last aggregation keyed on `(history version, granularity)`.
///
/// The sample source bumps its version on every append, so a hit only
/// happens when the same snapshot is re-aggregated (e.g. a redraw between
/// ticks). Output is identical to calling [`crate::aggregate_at`] directly.
#[derive(Debug, Default)]
pub struct ChartCache {
    entry: Option<(u64, Granularity, AggregatedSeries)>,
    hits:  u64,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the aggregation for `history` at `granularity`, recomputing it
    /// only when `version` or `granularity` changed since the last call.
    ///
    /// `now` is not part of the key. A hit returns buckets windowed against
    /// the `now` of the call that filled the entry, so callers that reuse a
    /// version while the clock moves on must [`clear`](Self::clear) first.
    pub fn get_or_compute<Tz: TimeZone>(
        &mut self,
        version: u64,
        history: &[RawPoint],
        granularity: Granularity,
        now: &DateTime<Tz>,
    ) -> AggregatedSeries
    where
        Tz::Offset: std::fmt::Display,
    {
        if let Some((v, g, series)) = &self.entry {
            if *v == version && *g == granularity {
                self.hits += 1;
                trace!(version, %granularity, "chart cache hit");
                return series.clone();
            }
        }

        let series = crate::aggregate_at(history, granularity, now);
        self.entry = Some((version, granularity, series.clone()));
        series
    }

    /// Drop the memoized entry so the next call re-windows against its `now`.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Number of calls answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::Metric;
    use chrono::Utc;

    fn history() -> Vec<RawPoint> {
        let ts = Utc.with_ymd_and_hms(2025, 11, 5, 8, 0, 0).unwrap().timestamp_millis();
        vec![RawPoint {
            timestamp: ts,
            temperature: 21.0,
            humidity: 50.0,
            soil_moisture: 30.0,
            water_tank: 70.0,
            battery: 90.0,
        }]
    }

    #[test]
    fn hit_on_same_version_and_granularity() {
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap();
        let h = history();
        let mut cache = ChartCache::new();

        let first = cache.get_or_compute(1, &h, Granularity::Hourly, &now);
        let second = cache.get_or_compute(1, &h, Granularity::Hourly, &now);
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(first.values(Metric::Temperature), Some(&[21.0][..]));
    }

    #[test]
    fn miss_on_new_version_or_granularity() {
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap();
        let h = history();
        let mut cache = ChartCache::new();

        cache.get_or_compute(1, &h, Granularity::Hourly, &now);
        let daily = cache.get_or_compute(1, &h, Granularity::Daily, &now);
        assert_eq!(daily.labels, vec!["5/11"]);
        cache.get_or_compute(2, &[], Granularity::Daily, &now);
        assert_eq!(cache.hits(), 0);

        cache.clear();
        cache.get_or_compute(2, &[], Granularity::Daily, &now);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn clear_lets_a_later_clock_age_buckets_out() {
        let h = history();
        let mut cache = ChartCache::new();
        let morning = Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2025, 11, 6, 10, 0, 0).unwrap();

        cache.get_or_compute(1, &h, Granularity::Hourly, &morning);
        let stale = cache.get_or_compute(1, &h, Granularity::Hourly, &next_day);
        assert_eq!(stale.labels, vec!["08:00"]);

        cache.clear();
        let fresh = cache.get_or_compute(1, &h, Granularity::Hourly, &next_day);
        assert!(fresh.is_placeholder());
    }
}
