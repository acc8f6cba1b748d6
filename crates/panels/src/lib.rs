pub mod chart;
pub mod schedules;
pub mod sensors;
pub mod welcome;

pub use chart::ChartPanel;
pub use schedules::SchedulePanel;
pub use sensors::SensorPanel;
pub use welcome::WelcomePanel;

/// Solid bar of up to `width` cells, proportional to `value / max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    "█".repeat(filled(value, max, width))
}

/// Bar of exactly `width` cells: filled part then track.
pub fn meter(value: f64, max: f64, width: usize) -> String {
    let n = filled(value, max, width);
    format!("{}{}", "█".repeat(n), "░".repeat(width - n))
}

fn filled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let frac = (value / max).clamp(0.0, 1.0);
    ((frac * width as f64).round() as usize).min(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_fills_proportionally() {
        assert_eq!(meter(50.0, 100.0, 4), "██░░");
        assert_eq!(meter(0.0, 100.0, 3), "░░░");
        assert_eq!(meter(250.0, 100.0, 2), "██");
    }

    #[test]
    fn bar_handles_zero_max() {
        assert_eq!(bar(3.0, 0.0, 10), "");
        assert_eq!(bar(5.0, 10.0, 10), "█████");
    }
}
