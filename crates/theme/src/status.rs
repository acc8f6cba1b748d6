use agro_core::Tone;
use serde::{Deserialize, Serialize};

/// Traffic-light classification of a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Good,
    Warn,
    Bad,
}

impl StatusLevel {
    /// Higher is better: above `good` is good, above `warn` is a warning.
    pub fn rising(value: f64, good: f64, warn: f64) -> Self {
        if value > good {
            StatusLevel::Good
        } else if value > warn {
            StatusLevel::Warn
        } else {
            StatusLevel::Bad
        }
    }

    /// Lower is better: below `good` is good, below `warn` is a warning.
    pub fn falling(value: f64, good: f64, warn: f64) -> Self {
        if value < good {
            StatusLevel::Good
        } else if value < warn {
            StatusLevel::Warn
        } else {
            StatusLevel::Bad
        }
    }
}

impl From<StatusLevel> for Tone {
    fn from(level: StatusLevel) -> Self {
        match level {
            StatusLevel::Good => Tone::Good,
            StatusLevel::Warn => Tone::Warn,
            StatusLevel::Bad  => Tone::Bad,
        }
    }
}

pub fn battery(percent: f64) -> StatusLevel {
    StatusLevel::rising(percent, 60.0, 30.0)
}

pub fn water_tank(percent: f64) -> StatusLevel {
    StatusLevel::rising(percent, 60.0, 30.0)
}

pub fn temperature(celsius: f64) -> StatusLevel {
    StatusLevel::falling(celsius, 30.0, 35.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_thresholds() {
        assert_eq!(battery(76.0), StatusLevel::Good);
        assert_eq!(battery(60.0), StatusLevel::Warn);
        assert_eq!(battery(31.0), StatusLevel::Warn);
        assert_eq!(battery(30.0), StatusLevel::Bad);
    }

    #[test]
    fn temperature_is_reversed() {
        assert_eq!(temperature(29.9), StatusLevel::Good);
        assert_eq!(temperature(30.0), StatusLevel::Warn);
        assert_eq!(temperature(34.9), StatusLevel::Warn);
        assert_eq!(temperature(35.0), StatusLevel::Bad);
    }

    #[test]
    fn water_tank_matches_battery() {
        for v in [0.0, 30.0, 45.0, 61.0, 100.0] {
            assert_eq!(water_tank(v), battery(v));
        }
    }
}
