use crate::cell::ValueCell;
use crate::models::CurrentRun;
use crate::models::Schedule;

/// Published state observed by dashboards and layouts.
///
/// The schedule is unset until the first successful update.
#[derive(Default)]
pub struct ScheduleState {
    pub schedule: ValueCell<Schedule>,
    pub current_run: ValueCell<CurrentRun>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Default::default()
    }
}
