use agro_core::{DashError, Result, WateringSchedule, Zone};
use chrono::{NaiveTime, Weekday};
use tracing::{debug, info};

use crate::form::ScheduleForm;

/// Everything the schedule screen can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleAction {
    /// Open a blank form with the given start time.
    OpenNew(NaiveTime),
    /// Open the form on an existing schedule.
    OpenEdit(u64),
    SetZone(Zone),
    SetTime(NaiveTime),
    SetDuration(u32),
    ToggleDay(Weekday),
    /// Replace the repeat days outright.
    SetDays(Vec<Weekday>),
    SetNotes(String),
    /// Validate and commit the open form.
    Save,
    /// Close the form without saving.
    Cancel,
    ToggleActive(u64),
    Delete(u64),
}

/// Schedule list plus the (optional) open form.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    pub schedules: Vec<WateringSchedule>,
    pub form: Option<ScheduleForm>,
    next_id: u64,
}

impl ScheduleState {
    pub fn new(schedules: Vec<WateringSchedule>) -> Self {
        let next_id = schedules.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self { schedules, form: None, next_id }
    }

    pub fn get(&self, id: u64) -> Option<&WateringSchedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// Apply `action`, returning the next state.
    ///
    /// On error the caller keeps the previous state; nothing is half-applied.
    pub fn reduce(&self, action: ScheduleAction) -> Result<Self> {
        let mut next = self.clone();
        debug!(?action, "schedule action");

        match action {
            ScheduleAction::OpenNew(time) => {
                next.form = Some(ScheduleForm::new(time));
            }
            ScheduleAction::OpenEdit(id) => {
                let schedule = self.get(id).ok_or_else(|| unknown(id))?;
                next.form = Some(ScheduleForm::edit(schedule));
            }
            ScheduleAction::SetZone(zone) => next.form_mut()?.zone = zone,
            ScheduleAction::SetTime(time) => next.form_mut()?.set_time(time),
            ScheduleAction::SetDuration(minutes) => next.form_mut()?.set_duration(minutes)?,
            ScheduleAction::ToggleDay(day) => next.form_mut()?.toggle_day(day),
            ScheduleAction::SetDays(days) => next.form_mut()?.set_days(days),
            ScheduleAction::SetNotes(notes) => next.form_mut()?.notes = notes,
            ScheduleAction::Save => next.save()?,
            ScheduleAction::Cancel => next.form = None,
            ScheduleAction::ToggleActive(id) => {
                let schedule = next.get_mut(id)?;
                schedule.active = !schedule.active;
                info!(id, active = schedule.active, "schedule toggled");
            }
            ScheduleAction::Delete(id) => {
                let before = next.schedules.len();
                next.schedules.retain(|s| s.id != id);
                if next.schedules.len() == before {
                    return Err(unknown(id));
                }
                info!(id, "schedule deleted");
            }
        }

        Ok(next)
    }

    /// Apply several actions in order; stops at the first failure.
    pub fn reduce_all(&self, actions: impl IntoIterator<Item = ScheduleAction>) -> Result<Self> {
        actions
            .into_iter()
            .try_fold(self.clone(), |state, action| state.reduce(action))
    }

    fn form_mut(&mut self) -> Result<&mut ScheduleForm> {
        self.form
            .as_mut()
            .ok_or_else(|| DashError::Schedule("no schedule form is open".into()))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut WateringSchedule> {
        self.schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| unknown(id))
    }

    fn save(&mut self) -> Result<()> {
        let form = self.form_mut()?.clone();
        form.validate()?;

        match form.editing {
            Some(id) => {
                let schedule = self.get_mut(id)?;
                schedule.zone = form.zone;
                schedule.time = form.time;
                schedule.duration_minutes = form.duration_minutes;
                schedule.days = form.days.clone();
                schedule.notes = form.notes();
                info!(id, "schedule updated");
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.schedules.insert(
                    0,
                    WateringSchedule {
                        id,
                        zone: form.zone,
                        time: form.time,
                        days: form.days.clone(),
                        duration_minutes: form.duration_minutes,
                        active: true,
                        notes: form.notes(),
                    },
                );
                info!(id, "schedule created");
            }
        }

        self.form = None;
        Ok(())
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new(crate::default_schedules())
    }
}

fn unknown(id: u64) -> DashError {
    DashError::Schedule(format!("no schedule with id {id}"))
}
