use super::*;

use crate::models::CurrentRun;

/// Gets the current run.
pub(super) async fn get<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Result<Json<Arc<CurrentRun>>, Error>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    state
        .poller
        .sync()
        .state()
        .current_run
        .get()
        .map(Json)
        .ok_or(Error::CurrentRunNotSet)
}

/// Moves to the next run.
pub(super) async fn next<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Result<Json<WebCurrentRunChanged>, Error>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    let changed = state.poller.sync().controller().advance().await?;
    Ok(Json(WebCurrentRunChanged { changed }))
}

/// Moves to the previous run.
pub(super) async fn previous<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Result<Json<WebCurrentRunChanged>, Error>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    let changed = state.poller.sync().controller().retreat().await?;
    Ok(Json(WebCurrentRunChanged { changed }))
}

/// Moves to the run with a specified order.
pub(super) async fn set_by_order<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
    Path(order): Path<u32>,
) -> Result<Json<WebCurrentRunChanged>, Error>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    let changed = state
        .poller
        .sync()
        .controller()
        .jump_to_order(order)
        .await?;
    Ok(Json(WebCurrentRunChanged { changed }))
}
