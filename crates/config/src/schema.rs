use agro_core::{ChartKind, Granularity};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `agrodash.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Sample source settings.
    pub simulator: SimulatorConfig,
    /// Chart selection shown at start-up.
    pub chart: ChartConfig,
    /// Terminal output settings.
    pub display: DisplayConfig,
    /// Theme / color settings.
    pub theme: ThemeConfig,
}

/// Simulated sensor feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Milliseconds between readings.
    pub interval_ms: u64,
    /// Number of samples kept in the history buffer.
    pub capacity: usize,
    /// Fixed RNG seed for reproducible runs; random when unset.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            capacity:    500,
            seed:        None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub granularity: Granularity,
    pub kind: ChartKind,
}

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable panels.
    #[default]
    Text,
    /// One JSON document per refresh.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Name shown in the welcome panel.
    pub user_name: String,
    pub output: OutputFormat,
    /// Emit ANSI colors in text output.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            user_name: "Farmer".to_string(),
            output:    OutputFormat::Text,
            color:     true,
        }
    }
}

/// Colors as CSS hex strings (`#RRGGBB` or `#RRGGBBAA`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Reading in its healthy range.
    pub good: String,
    /// Reading drifting out of range.
    pub warn: String,
    /// Reading needing attention.
    pub bad: String,
    /// Headings and neutral highlights.
    pub accent: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub water_tank: String,
    pub battery: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            good:          "#16a34a".to_string(),
            warn:          "#eab308".to_string(),
            bad:           "#dc2626".to_string(),
            accent:        "#00796b".to_string(),
            temperature:   "#dc2626".to_string(),
            humidity:      "#16a34a".to_string(),
            soil_moisture: "#2563eb".to_string(),
            water_tank:    "#0891b2".to_string(),
            battery:       "#eab308".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: DashConfig = toml::from_str(
            r#"
            [chart]
            granularity = "weekly"

            [simulator]
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(cfg.chart.granularity, Granularity::Weekly);
        assert_eq!(cfg.chart.kind, ChartKind::Line);
        assert_eq!(cfg.simulator.seed, Some(9));
        assert_eq!(cfg.simulator.interval_ms, 3_000);
        assert_eq!(cfg.simulator.capacity, 500);
        assert_eq!(cfg.display.output, OutputFormat::Text);
    }

    #[test]
    fn empty_file_is_default() {
        let cfg: DashConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.display.user_name, "Farmer");
        assert_eq!(cfg.theme.good, "#16a34a");
    }

    #[test]
    fn unknown_granularity_is_rejected() {
        let res: Result<DashConfig, _> = toml::from_str("[chart]\ngranularity = \"yearly\"");
        assert!(res.is_err());
    }
}
