use super::*;

use crate::models::Schedule;

/// Gets the schedule.
///
/// An empty list is returned until the schedule is fetched for the first
/// time.
pub(super) async fn get<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Json<Arc<Schedule>>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    Json(
        state
            .poller
            .sync()
            .state()
            .schedule
            .get()
            .unwrap_or_default(),
    )
}

/// Updates the schedule immediately.
///
/// The response tells whether the schedule changed.  A failure in fetching
/// the schedule is reported as no change.
pub(super) async fn update<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Json<WebScheduleUpdated>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    let updated = state.poller.update_now().await;
    Json(WebScheduleUpdated { updated })
}
