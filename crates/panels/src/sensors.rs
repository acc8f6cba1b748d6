use agro_core::{DashState, Line, Panel, SensorReading, Tone};
use agro_theme::status;

use crate::meter;

/// Width of the progress meters, in cells.
const METER_WIDTH: usize = 12;

/// Current value of every sensor with status colouring and range hints.
#[derive(Debug, Default)]
pub struct SensorPanel;

impl SensorPanel {
    pub fn new() -> Self {
        Self
    }
}

/// One row of the sensor grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRow {
    pub name:     &'static str,
    pub value:    String,
    pub tone:     Tone,
    /// Fill percentage for the meter, if the reading has one.
    pub progress: Option<f64>,
    pub hint:     Option<&'static str>,
}

/// Rows in display order.
pub fn rows(r: &SensorReading) -> Vec<SensorRow> {
    vec![
        SensorRow {
            name:     "Temperature",
            value:    format!("{:.1}°C", r.temperature),
            tone:     status::temperature(r.temperature).into(),
            progress: None,
            hint:     None,
        },
        SensorRow {
            name:     "Rainfall",
            value:    format!("{:.1} mm", r.rainfall),
            tone:     Tone::Accent,
            progress: None,
            hint:     None,
        },
        SensorRow {
            name:     "Battery",
            value:    format!("{:.0}%", r.battery),
            tone:     status::battery(r.battery).into(),
            progress: Some(progress(r.battery)),
            hint:     None,
        },
        SensorRow {
            name:     "Water tank",
            value:    format!("{:.0}%", r.water_tank),
            tone:     status::water_tank(r.water_tank).into(),
            progress: Some(progress(r.water_tank)),
            hint:     None,
        },
        SensorRow {
            name:     "Air humidity",
            value:    format!("{:.1}%", r.humidity),
            tone:     Tone::Accent,
            progress: Some(progress(r.humidity)),
            hint:     Some("Optimal: 40-70%"),
        },
        SensorRow {
            name:     "Soil moisture",
            value:    format!("{:.1}%", r.soil_moisture),
            tone:     Tone::Accent,
            progress: Some(progress(r.soil_moisture)),
            hint:     Some("Optimal: 30-60%"),
        },
        SensorRow {
            name:     "Water pH",
            value:    format!("{:.1}", r.ph),
            tone:     Tone::Accent,
            progress: Some(progress((r.ph - 4.0) / 6.0 * 100.0)),
            hint:     Some("Range: 4.0-10.0"),
        },
        SensorRow {
            name:     "Wind speed",
            value:    format!("{:.1} m/s", r.wind_speed),
            tone:     Tone::Accent,
            progress: Some(progress(r.wind_speed / 50.0 * 100.0)),
            hint:     Some("Max: 50 m/s"),
        },
    ]
}

/// Clamp a fill percentage to `[0, 100]`.
pub fn progress(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}

impl Panel for SensorPanel {
    fn id(&self) -> &str {
        "sensors"
    }

    fn title(&self, _state: &DashState) -> String {
        "Sensors".to_string()
    }

    fn render(&self, state: &DashState) -> Vec<Line> {
        rows(&state.reading)
            .into_iter()
            .map(|row| {
                let mut line = Line::new()
                    .push(format!("{:<14}", row.name), Tone::Plain)
                    .push(format!("{:>9}", row.value), row.tone);
                if let Some(p) = row.progress {
                    line = line.push(format!("  {}", meter(p, 100.0, METER_WIDTH)), row.tone);
                }
                if let Some(hint) = row.hint {
                    line = line.push(format!("  {hint}"), Tone::Muted);
                }
                line
            })
            .collect()
    }
}
