use std::sync::Arc;

use crate::boxart::BoxartResolver;
use crate::boxart::LoadImage;
use crate::checklist::ResetChecklist;
use crate::error::Error;
use crate::models::CurrentRun;
use crate::models::Run;
use crate::models::Schedule;

use super::ScheduleState;

/// Moves the current run within the published schedule.
pub struct CurrentRunController<L, C> {
    state: Arc<ScheduleState>,
    resolver: BoxartResolver<L>,
    checklist: C,
}

impl<L, C> CurrentRunController<L, C>
where
    L: LoadImage,
    C: ResetChecklist,
{
    pub fn new(state: Arc<ScheduleState>, resolver: BoxartResolver<L>, checklist: C) -> Self {
        CurrentRunController {
            state,
            resolver,
            checklist,
        }
    }

    /// Moves to the run recorded as the next run of the current run.
    pub async fn advance(&self) -> Result<bool, Error> {
        let current = self.state.current_run.get().ok_or(Error::CurrentRunNotSet)?;
        let next_run = current.next_run.as_ref().ok_or(Error::NoNextRun)?;
        let index = (next_run.order as usize).checked_sub(1);
        self.navigate(index).await
    }

    /// Moves to the run preceding the current run.
    pub async fn retreat(&self) -> Result<bool, Error> {
        let current = self.state.current_run.get().ok_or(Error::CurrentRunNotSet)?;
        let index = (current.order as usize).checked_sub(2);
        self.navigate(index).await
    }

    pub async fn jump_to_order(&self, order: u32) -> Result<bool, Error> {
        let index = (order as usize).checked_sub(1);
        self.navigate(index).await
    }

    async fn navigate(&self, index: Option<usize>) -> Result<bool, Error> {
        let schedule = self.state.schedule.get().ok_or(Error::RunNotFound)?;
        let run = index
            .and_then(|index| schedule.get(index))
            .ok_or(Error::RunNotFound)?;
        self.checklist.reset();
        self.publish(&schedule, run).await
    }

    /// Publishes `run` as the current run if the result differs from the
    /// published one.
    ///
    /// `run` must be contained in `schedule`.  Nothing is published when its
    /// boxart cannot be resolved.
    pub(crate) async fn publish(&self, schedule: &Schedule, run: &Run) -> Result<bool, Error> {
        let mut candidate = CurrentRun {
            run: run.clone(),
            next_run: schedule.get(run.next_index()).cloned(),
        };

        match self.resolver.resolve(&candidate.boxart.url).await {
            Ok(image) => candidate.run.boxart.base64 = Some(image),
            Err(err) => {
                tracing::warn!(
                    %err,
                    run.order,
                    %run.name,
                    "Failed to resolve boxart, current run not updated",
                );
                return Err(err);
            }
        }

        let changed = self.state.current_run.replace_if_changed(candidate);
        if changed {
            tracing::info!(current_run.order = run.order, current_run.name = %run.name, "Changed");
        } else {
            tracing::debug!(current_run.order = run.order, "Unchanged");
        }
        Ok(changed)
    }
}

// </coverage:exclude>
