use agro_core::{DashError, Result, WateringSchedule, Zone};
use chrono::{NaiveTime, Timelike, Weekday};

/// Durations (minutes) offered by the edit form.
pub const DURATION_OPTIONS: [u32; 11] = [1, 2, 3, 4, 5, 10, 15, 20, 30, 45, 60];

/// Default duration for a new schedule.
pub const DEFAULT_DURATION: u32 = 15;

/// Fields of the create/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    /// Id of the schedule being edited; `None` while creating.
    pub editing: Option<u64>,
    pub zone: Zone,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub days: Vec<Weekday>,
    pub notes: String,
}

impl ScheduleForm {
    /// Blank form for a new schedule starting at `time`.
    pub fn new(time: NaiveTime) -> Self {
        Self {
            editing: None,
            zone: Zone::Greenhouse,
            time: truncate_to_minute(time),
            duration_minutes: DEFAULT_DURATION,
            days: Vec::new(),
            notes: String::new(),
        }
    }

    /// Form pre-filled from an existing schedule.
    pub fn edit(schedule: &WateringSchedule) -> Self {
        Self {
            editing: Some(schedule.id),
            zone: schedule.zone,
            time: schedule.time,
            duration_minutes: schedule.duration_minutes,
            days: schedule.days.clone(),
            notes: schedule.notes.clone().unwrap_or_default(),
        }
    }

    /// Add `day` if absent, remove it if present.
    pub fn toggle_day(&mut self, day: Weekday) {
        if let Some(pos) = self.days.iter().position(|&d| d == day) {
            self.days.remove(pos);
        } else {
            self.days.push(day);
        }
    }

    /// Replace the repeat days, dropping repeats but keeping order.
    pub fn set_days(&mut self, days: impl IntoIterator<Item = Weekday>) {
        self.days.clear();
        for day in days {
            if !self.days.contains(&day) {
                self.days.push(day);
            }
        }
    }

    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        if !DURATION_OPTIONS.contains(&minutes) {
            return Err(DashError::Schedule(format!(
                "{minutes} minutes is not an offered duration"
            )));
        }
        self.duration_minutes = minutes;
        Ok(())
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = truncate_to_minute(time);
    }

    /// Check the form can be saved.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(DashError::Schedule("pick at least one repeat day".into()));
        }
        Ok(())
    }

    /// Notes as stored on the schedule (blank becomes `None`).
    pub fn notes(&self) -> Option<String> {
        let trimmed = self.notes.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
