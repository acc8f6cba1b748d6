use agro_core::{DashState, Line, Panel, Tone};
use chrono::Timelike;

/// Greeting, clock, and the next watering slot.
#[derive(Debug)]
pub struct WelcomePanel {
    user_name: String,
}

impl WelcomePanel {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self { user_name: user_name.into() }
    }

    pub fn set_user_name(&mut self, user_name: impl Into<String>) {
        self.user_name = user_name.into();
    }
}

impl Panel for WelcomePanel {
    fn id(&self) -> &str {
        "welcome"
    }

    fn title(&self, _state: &DashState) -> String {
        format!("Hi {}", self.user_name)
    }

    fn render(&self, state: &DashState) -> Vec<Line> {
        let greeting = Line::new().push(greeting(state.time.hour()), Tone::Accent).push(
            format!("  {}", state.time.format("%H:%M")),
            Tone::Muted,
        );

        let next = match agro_schedule::next_due(&state.schedules, &state.time) {
            Some(up) => Line::new()
                .push("Next watering  ", Tone::Plain)
                .push(up.at.format("%a %H:%M").to_string(), Tone::Accent)
                .push(
                    format!("  {} · {} min", up.schedule.zone, up.schedule.duration_minutes),
                    Tone::Muted,
                ),
            None => Line::new().push("No active watering schedule", Tone::Muted),
        };

        vec![greeting, next]
    }
}

/// Greeting for the hour of day (0–23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=3   => "Good early morning",
        4..=10  => "Good morning",
        11..=14 => "Good day",
        15..=18 => "Good afternoon",
        _       => "Good evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_schedule::default_schedules;
    use chrono::{Local, TimeZone};

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting(3), "Good early morning");
        assert_eq!(greeting(4), "Good morning");
        assert_eq!(greeting(10), "Good morning");
        assert_eq!(greeting(11), "Good day");
        assert_eq!(greeting(15), "Good afternoon");
        assert_eq!(greeting(19), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn shows_next_schedule() {
        // 2025-11-05 is a Wednesday.
        let state = DashState {
            time: Local.with_ymd_and_hms(2025, 11, 5, 7, 0, 0).unwrap(),
            schedules: default_schedules(),
            ..DashState::default()
        };
        let panel = WelcomePanel::new("Rina");
        let lines = panel.render(&state);

        assert_eq!(panel.title(&state), "Hi Rina");
        assert_eq!(lines[0].plain_text(), "Good morning  07:00");
        assert_eq!(lines[1].plain_text(), "Next watering  Wed 08:00  Greenhouse · 15 min");
    }

    #[test]
    fn without_schedules() {
        let state = DashState::default();
        let lines = WelcomePanel::new("x").render(&state);
        assert_eq!(lines[1].plain_text(), "No active watering schedule");
    }
}
