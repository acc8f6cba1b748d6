use agro_core::{ChartKind, DashState, Line, Metric, Panel, Tone};

use crate::bar;

/// Column width of one bucket in the line table.
const COLUMN: usize = 7;
/// Longest bar in the bar form, in cells.
const BAR_WIDTH: usize = 30;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Trend chart over the aggregated history.
///
/// The line form tabulates every charted metric; the bar form shows
/// temperature only.
#[derive(Debug, Default)]
pub struct ChartPanel;

impl ChartPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for ChartPanel {
    fn id(&self) -> &str {
        "chart"
    }

    fn title(&self, state: &DashState) -> String {
        let kind = match state.chart_kind {
            ChartKind::Line => "line",
            ChartKind::Bar  => "bar",
        };
        format!("Sensor chart · {} · {kind}", state.chart.granularity)
    }

    fn render(&self, state: &DashState) -> Vec<Line> {
        match state.chart_kind {
            ChartKind::Line => line_form(state),
            ChartKind::Bar  => bar_form(state),
        }
    }
}

fn line_form(state: &DashState) -> Vec<Line> {
    let chart = &state.chart;
    let mut header = Line::new().push(format!("{:<14}", ""), Tone::Plain);
    for label in &chart.labels {
        header = header.push(format!("{label:>COLUMN$}"), Tone::Muted);
    }

    let mut lines = vec![header];
    for series in &chart.series {
        let tone = Tone::Series(series.metric);
        let mut line = Line::new().push(format!("{:<14}", series.metric.label()), tone);
        for v in &series.values {
            line = line.push(format!("{v:>COLUMN$.1}"), Tone::Plain);
        }
        line = line.push(format!("  {}", sparkline(&series.values)), tone);
        lines.push(line);
    }
    lines
}

fn bar_form(state: &DashState) -> Vec<Line> {
    let bars = state.chart.bar();
    let max = bars.values.iter().copied().fold(0.0_f64, f64::max);
    let tone = Tone::Series(Metric::Temperature);

    bars.labels
        .iter()
        .zip(&bars.values)
        .map(|(label, &v)| {
            Line::new()
                .push(format!("{label:>6} "), Tone::Muted)
                .push(bar(v, max, BAR_WIDTH), tone)
                .push(format!(" {v:.1}{}", Metric::Temperature.unit()), Tone::Plain)
        })
        .collect()
}

/// One block glyph per value, scaled between the series min and max.
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|&v| {
            if !span.is_finite() || span <= 0.0 {
                return SPARKS[0];
            }
            let idx = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
            SPARKS[idx.min(SPARKS.len() - 1)]
        })
        .collect()
}
