//! Time-bucketed aggregation of the sensor history for the trend charts.
//!
//! Every call recomputes the buckets from the full history; nothing is kept
//! between calls except in the opt-in [`ChartCache`].

pub mod bucket;
pub mod cache;

pub use cache::ChartCache;

use agro_core::{AggregatedSeries, Granularity, Metric, MetricSeries, RawPoint};
use chrono::{DateTime, Local, TimeZone};
use std::collections::HashMap;

/// Maximum number of buckets shown on a chart.
pub const MAX_BUCKETS: usize = 7;

/// Aggregate `history` at `granularity` relative to the local clock.
pub fn aggregate(history: &[RawPoint], granularity: Granularity) -> AggregatedSeries {
    aggregate_at(history, granularity, &Local::now())
}

/// Aggregate `history` at `granularity` relative to `now`.
///
/// Bucket labels are derived in `now`'s time zone. Points outside the
/// granularity's window are skipped; if no bucket survives the result is
/// [`AggregatedSeries::placeholder`].
pub fn aggregate_at<Tz: TimeZone>(
    history: &[RawPoint],
    granularity: Granularity,
    now: &DateTime<Tz>,
) -> AggregatedSeries
where
    Tz::Offset: std::fmt::Display,
{
    let buckets = group(history, granularity, now);
    if buckets.is_empty() {
        return AggregatedSeries::placeholder(granularity);
    }

    let recent = &buckets[buckets.len().saturating_sub(MAX_BUCKETS)..];

    let series = Metric::ALL
        .iter()
        .enumerate()
        .map(|(i, &metric)| MetricSeries {
            metric,
            values: recent.iter().map(|b| average(&b.values[i])).collect(),
        })
        .collect();

    AggregatedSeries {
        granularity,
        labels: recent.iter().map(|b| b.label.clone()).collect(),
        series,
    }
}

/// Arithmetic mean rounded to one decimal place. An empty slice averages
/// to `0`.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    round_tenths(mean)
}

/// Round the exact binary value of `x` to one decimal, exact ties away from
/// zero. `1.45` is stored as `1.4499999…` and so rounds down.
fn round_tenths(x: f64) -> f64 {
    // From 2^52 up every f64 is a whole number.
    if !x.is_finite() || x.abs() >= 4_503_599_627_370_496.0 {
        return x;
    }

    // An f64 has at most 1074 fractional digits, so this expansion is exact.
    let exact = format!("{:.1074}", x.abs());
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|hundredths| hundredths >= 5);

    let Ok(whole) = whole.parse::<u64>() else {
        return x;
    };
    let scaled = whole * 10 + tenths + u64::from(round_up);
    let rounded = format!("{}.{}", scaled / 10, scaled % 10)
        .parse::<f64>()
        .unwrap_or(x);
    if x < 0.0 { -rounded } else { rounded }
}

/// Raw values collected for one label, one list per entry of [`Metric::ALL`].
#[derive(Debug)]
struct Bucket {
    label:  String,
    values: [Vec<f64>; Metric::ALL.len()],
}

/// Group in-window points by label, buckets in first-seen order.
fn group<Tz: TimeZone>(
    history: &[RawPoint],
    granularity: Granularity,
    now: &DateTime<Tz>,
) -> Vec<Bucket>
where
    Tz::Offset: std::fmt::Display,
{
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in history {
        let Some(label) = bucket::key_for(granularity, point.timestamp, now) else {
            continue;
        };

        let slot = *index.entry(label.clone()).or_insert_with(|| {
            buckets.push(Bucket { label, values: Default::default() });
            buckets.len() - 1
        });

        for (i, &metric) in Metric::ALL.iter().enumerate() {
            buckets[slot].values[i].push(point.value(metric));
        }
    }

    buckets
}
