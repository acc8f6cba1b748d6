use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used by the placeholder series when no bucket survives aggregation.
pub const PLACEHOLDER_LABEL: &str = "...";

/// Time resolution used to bucket the sensor history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Hourly,
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hourly  => "hourly",
            Granularity::Daily   => "daily",
            Granularity::Weekly  => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" | "h"  => Ok(Granularity::Hourly),
            "daily" | "d"   => Ok(Granularity::Daily),
            "weekly" | "w"  => Ok(Granularity::Weekly),
            "monthly" | "m" => Ok(Granularity::Monthly),
            other => Err(format!("unknown granularity '{other}'")),
        }
    }
}

/// Which chart form the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One line per metric.
    #[default]
    Line,
    /// Temperature only, one bar per bucket.
    Bar,
}

/// Metrics recorded in the history buffer and charted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    SoilMoisture,
    WaterTank,
    Battery,
}

impl Metric {
    /// Charting order of the line form.
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::SoilMoisture,
        Metric::WaterTank,
        Metric::Battery,
    ];

    /// Legend text.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature  => "Temperature",
            Metric::Humidity     => "Air Humidity",
            Metric::SoilMoisture => "Soil Moisture",
            Metric::WaterTank    => "Water Tank",
            Metric::Battery      => "Battery",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            _                   => "%",
        }
    }
}

/// Averaged values of one metric, aligned by index with the series labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: Metric,
    pub values: Vec<f64>,
}

/// Chart-ready summary of the sensor history for one granularity.
///
/// Every entry of `series` holds exactly `labels.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub granularity: Granularity,
    pub labels:      Vec<String>,
    pub series:      Vec<MetricSeries>,
}

impl AggregatedSeries {
    /// The "no data" output: a single `"..."` label with a zero for every metric.
    pub fn placeholder(granularity: Granularity) -> Self {
        Self {
            granularity,
            labels: vec![PLACEHOLDER_LABEL.to_string()],
            series: Metric::ALL
                .iter()
                .map(|&metric| MetricSeries { metric, values: vec![0.0] })
                .collect(),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.labels.len() == 1 && self.labels[0] == PLACEHOLDER_LABEL
    }

    /// Values for `metric`, if it is charted.
    pub fn values(&self, metric: Metric) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.metric == metric)
            .map(|s| s.values.as_slice())
    }

    /// The bar form: temperature only, one value per label.
    pub fn bar(&self) -> BarSeries {
        BarSeries {
            labels: self.labels.clone(),
            values: self
                .values(Metric::Temperature)
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| vec![0.0; self.labels.len()]),
        }
    }
}

/// Single-metric (temperature) series used by the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}
