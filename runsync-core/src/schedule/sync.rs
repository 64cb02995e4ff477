use std::sync::Arc;
use std::time::Instant;

use crate::boxart::LoadImage;
use crate::checklist::ResetChecklist;
use crate::error::Error;
use crate::formatter::ScheduleFormatter;
use crate::models::Run;
use crate::models::Schedule;
use crate::tracker::FetchSchedule;

use super::CurrentRunController;
use super::ScheduleState;

/// Keeps the published schedule in sync with the tracker.
pub struct ScheduleSync<F, L, C> {
    fetcher: F,
    formatter: ScheduleFormatter,
    state: Arc<ScheduleState>,
    controller: Arc<CurrentRunController<L, C>>,
}

impl<F, L, C> ScheduleSync<F, L, C>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    pub fn new(
        fetcher: F,
        formatter: ScheduleFormatter,
        state: Arc<ScheduleState>,
        controller: Arc<CurrentRunController<L, C>>,
    ) -> Self {
        ScheduleSync {
            fetcher,
            formatter,
            state,
            controller,
        }
    }

    pub fn state(&self) -> &Arc<ScheduleState> {
        &self.state
    }

    pub fn controller(&self) -> &Arc<CurrentRunController<L, C>> {
        &self.controller
    }

    /// Fetches the schedule and reconciles the current run if the schedule
    /// changed.
    ///
    /// Returns `true` if the schedule changed.  Errors are logged and never
    /// returned; the published state stays as it was.
    pub async fn trigger_update(&self) -> bool {
        tracing::debug!("Updating...");
        let now = Instant::now();
        match self.update().await {
            Ok(updated) => {
                let elapsed = humantime::format_duration(now.elapsed());
                if updated {
                    tracing::info!(%elapsed, "Schedule updated");
                } else {
                    tracing::debug!(%elapsed, "Schedule unchanged");
                }
                updated
            }
            Err(err) => {
                tracing::error!(%err, "Failed to update schedule");
                false
            }
        }
    }

    async fn update(&self) -> Result<bool, Error> {
        let records = self.fetcher.fetch().await?;
        let schedule = Arc::new(self.formatter.format(&records)?);

        if !self.state.schedule.replace_if_changed(schedule.clone()) {
            return Ok(false);
        }
        tracing::info!(schedule.len = schedule.len(), "Replaced");

        self.reconcile(&schedule).await;
        Ok(true)
    }

    async fn reconcile(&self, schedule: &Schedule) {
        let run = match self.state.current_run.get() {
            None => schedule.first(),
            Some(current) if current.order as usize > schedule.len() => schedule.first(),
            Some(current) => find_by_name(schedule, &current.name)
                .or_else(|| find_by_order(schedule, current.order)),
        };

        let run = match run {
            Some(run) => run,
            None => {
                // Keep the stale current run.
                tracing::warn!("No run to be the current run");
                return;
            }
        };

        // Failures have been logged.
        let _ = self.controller.publish(schedule, run).await;
    }
}

fn find_by_name<'a>(schedule: &'a Schedule, name: &str) -> Option<&'a Run> {
    schedule.iter().find(|run| run.name == name)
}

fn find_by_order(schedule: &Schedule, order: u32) -> Option<&Run> {
    schedule.iter().find(|run| run.order == order)
}

// </coverage:exclude>
