use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::boxart::LoadImage;
use crate::checklist::ResetChecklist;
use crate::tracker::FetchSchedule;

use super::ScheduleSync;

/// Triggers schedule updates at a fixed interval.
///
/// Each update runs in its own task so that a slow update doesn't delay the
/// following ones.  Updates may overlap.
pub struct SchedulePoller<F, L, C> {
    sync: Arc<ScheduleSync<F, L, C>>,
    interval: Duration,
    restart: Arc<Notify>,
}

impl<F, L, C> SchedulePoller<F, L, C>
where
    F: FetchSchedule + 'static,
    L: LoadImage + 'static,
    C: ResetChecklist + 'static,
{
    pub fn new(sync: Arc<ScheduleSync<F, L, C>>, interval: Duration) -> Self {
        SchedulePoller {
            sync,
            interval,
            restart: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> PollerHandle<F, L, C> {
        PollerHandle {
            sync: self.sync.clone(),
            restart: self.restart.clone(),
        }
    }

    pub async fn run(self) {
        tracing::info!(
            interval = %humantime::format_duration(self.interval),
            "Polling schedule...",
        );
        self.spawn_update();
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.spawn_update();
                }
                _ = self.restart.notified() => {
                    tracing::debug!("Restarted the timer");
                }
            }
        }
    }

    fn spawn_update(&self) {
        let sync = self.sync.clone();
        tokio::spawn(async move {
            sync.trigger_update().await;
        });
    }
}

/// Requests updates out of the regular interval.
pub struct PollerHandle<F, L, C> {
    sync: Arc<ScheduleSync<F, L, C>>,
    restart: Arc<Notify>,
}

impl<F, L, C> PollerHandle<F, L, C>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    pub fn sync(&self) -> &Arc<ScheduleSync<F, L, C>> {
        &self.sync
    }

    /// Updates the schedule immediately and restarts the timer.
    ///
    /// An update already in flight is not cancelled.
    pub async fn update_now(&self) -> bool {
        tracing::info!("Manual schedule update requested");
        self.restart.notify_one();
        let updated = self.sync.trigger_update().await;
        if updated {
            tracing::info!("Schedule successfully updated");
        } else {
            tracing::info!("Schedule unchanged, not updated");
        }
        updated
    }
}

impl<F, L, C> Clone for PollerHandle<F, L, C> {
    fn clone(&self) -> Self {
        PollerHandle {
            sync: self.sync.clone(),
            restart: self.restart.clone(),
        }
    }
}

// </coverage:exclude>
