use chrono::{DateTime, Local, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chart::{AggregatedSeries, ChartKind, Granularity, Metric};

/// Central dashboard state — every panel reads from this snapshot.
#[derive(Debug, Clone)]
pub struct DashState {
    /// Latest reading from the sample source.
    pub reading: SensorReading,
    /// Copy of the history buffer taken with `reading`.
    pub history: Vec<RawPoint>,
    /// Buffer version the history copy was taken at.
    pub history_version: u64,
    /// Selected chart bucketing.
    pub granularity: Granularity,
    /// Selected chart form.
    pub chart_kind: ChartKind,
    /// Aggregated chart data for `history` at `granularity`.
    pub chart: AggregatedSeries,
    /// Watering schedules, in display order.
    pub schedules: Vec<WateringSchedule>,
    /// Current local time (updated every second).
    pub time: DateTime<Local>,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            reading:         SensorReading::default(),
            history:         Vec::new(),
            history_version: 0,
            granularity:     Granularity::default(),
            chart_kind:      ChartKind::default(),
            chart:           AggregatedSeries::placeholder(Granularity::default()),
            schedules:       Vec::new(),
            time:            Local::now(),
        }
    }
}

/// A point-in-time snapshot of every simulated sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Rainfall in millimetres.
    pub rainfall: f64,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative air humidity (%).
    pub humidity: f64,
    /// Soil moisture (%).
    pub soil_moisture: f64,
    /// Water pH.
    pub ph: f64,
    /// Battery charge (%).
    pub battery: f64,
    /// Water tank fill level (%).
    pub water_tank: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            rainfall:      15.0,
            temperature:   30.0,
            humidity:      65.0,
            soil_moisture: 42.0,
            ph:            6.8,
            battery:       76.0,
            water_tank:    80.0,
            wind_speed:    5.0,
        }
    }
}

/// One timestamped sample in the history buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub water_tank: f64,
    pub battery: f64,
}

impl RawPoint {
    /// Capture the charted metrics of `reading` at `timestamp` (ms).
    pub fn from_reading(timestamp: i64, reading: &SensorReading) -> Self {
        Self {
            timestamp,
            temperature:   reading.temperature,
            humidity:      reading.humidity,
            soil_moisture: reading.soil_moisture,
            water_tank:    reading.water_tank,
            battery:       reading.battery,
        }
    }

    #[inline]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature  => self.temperature,
            Metric::Humidity     => self.humidity,
            Metric::SoilMoisture => self.soil_moisture,
            Metric::WaterTank    => self.water_tank,
            Metric::Battery      => self.battery,
        }
    }
}

/// Where a watering schedule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[default]
    Greenhouse,
    Field,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Greenhouse => f.write_str("Greenhouse"),
            Zone::Field      => f.write_str("Field"),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greenhouse" => Ok(Zone::Greenhouse),
            "field"      => Ok(Zone::Field),
            other        => Err(format!("unknown zone '{other}'")),
        }
    }
}

/// A recurring watering slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringSchedule {
    pub id: u64,
    pub zone: Zone,
    /// Start time of day (minute precision).
    pub time: NaiveTime,
    /// Repeat days, in the order the user picked them.
    pub days: Vec<Weekday>,
    pub duration_minutes: u32,
    pub active: bool,
    pub notes: Option<String>,
}

impl WateringSchedule {
    /// Start time formatted as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// What the sample source publishes after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSnapshot {
    /// Reading produced by this tick.
    pub reading: SensorReading,
    /// Copy of the history buffer after the tick's append.
    pub history: Vec<RawPoint>,
    /// Buffer version; bumped once per append.
    pub version: u64,
}
