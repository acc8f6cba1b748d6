use agro_core::{
    AggregatedSeries, BarSeries, ChartKind, DashState, Panel, SensorReading, WateringSchedule,
};
use agro_theme::Theme;
use serde::Serialize;

/// Clears the terminal and homes the cursor before each text frame.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Draw `panels` as one text frame.
pub fn text_frame(state: &DashState, panels: &[&dyn Panel], theme: &Theme, clear: bool) -> String {
    let mut out = String::new();
    if clear {
        out.push_str(CLEAR);
    }

    for panel in panels {
        out.push_str(&theme.paint(theme.accent, &format!("── {} ", panel.title(state))));
        out.push('\n');
        for line in panel.render(state) {
            out.push_str(&theme.render_line(&line));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str(&theme.paint(
        agro_theme::Color::GREY,
        "h/d/w/m: bucketing · line/bar: chart · help · quit",
    ));
    out.push('\n');
    out
}

/// Machine-readable frame, one per refresh.
#[derive(Debug, Serialize)]
pub struct JsonFrame<'a> {
    pub time: String,
    pub reading: &'a SensorReading,
    pub samples: usize,
    pub chart_kind: ChartKind,
    pub chart: &'a AggregatedSeries,
    /// Present only in the bar form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<BarSeries>,
    pub schedules: &'a [WateringSchedule],
}

impl<'a> JsonFrame<'a> {
    pub fn new(state: &'a DashState) -> Self {
        Self {
            time: state.time.to_rfc3339(),
            reading: &state.reading,
            samples: state.history.len(),
            chart_kind: state.chart_kind,
            chart: &state.chart,
            bar: (state.chart_kind == ChartKind::Bar).then(|| state.chart.bar()),
            schedules: &state.schedules,
        }
    }
}

/// Serialize `state` as a single-line JSON document.
pub fn json_frame(state: &DashState) -> serde_json::Result<String> {
    serde_json::to_string(&JsonFrame::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_config::ThemeConfig;
    use agro_panels::{ChartPanel, SensorPanel};

    #[test]
    fn text_frame_contains_each_panel_title() {
        let state = DashState::default();
        let theme = Theme::from_config(&ThemeConfig::default(), false);
        let sensors = SensorPanel::new();
        let chart = ChartPanel::new();
        let frame = text_frame(&state, &[&sensors, &chart], &theme, false);

        assert!(frame.contains("── Sensors"));
        assert!(frame.contains("── Sensor chart · hourly · line"));
        assert!(!frame.contains('\x1b'));
    }

    #[test]
    fn json_frame_has_bar_only_in_bar_form() {
        let mut state = DashState::default();
        let line: serde_json::Value = serde_json::from_str(&json_frame(&state).unwrap()).unwrap();
        assert!(line.get("bar").is_none());
        assert_eq!(line["chart"]["labels"][0], "...");
        assert_eq!(line["chart_kind"], "line");

        state.chart_kind = ChartKind::Bar;
        let bar: serde_json::Value = serde_json::from_str(&json_frame(&state).unwrap()).unwrap();
        assert_eq!(bar["bar"]["values"][0], 0.0);
    }
}
