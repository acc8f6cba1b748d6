use agro_core::{DashState, Line, Panel, Tone, WateringSchedule};

/// Watering schedule list.
#[derive(Debug, Default)]
pub struct SchedulePanel;

impl SchedulePanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for SchedulePanel {
    fn id(&self) -> &str {
        "schedules"
    }

    fn title(&self, _state: &DashState) -> String {
        "Watering schedules".to_string()
    }

    fn render(&self, state: &DashState) -> Vec<Line> {
        if state.schedules.is_empty() {
            return vec![Line::new().push("No schedules yet.", Tone::Muted)];
        }
        state.schedules.iter().map(row).collect()
    }
}

fn row(s: &WateringSchedule) -> Line {
    let days = s
        .days
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let (state, tone) = if s.active { ("on ", Tone::Good) } else { ("off", Tone::Muted) };

    let mut line = Line::new()
        .push(format!("#{:<3}", s.id), Tone::Muted)
        .push(format!("[{state}] "), tone)
        .push(format!("{:<11}", s.zone.to_string()), Tone::Accent)
        .push(format!("{}  {:>2} min  {days}", s.time_label(), s.duration_minutes), Tone::Plain);
    if let Some(notes) = &s.notes {
        line = line.push(format!("  {notes}"), Tone::Muted);
    }
    line
}
