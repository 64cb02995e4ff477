use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::routing;

use crate::boxart::LoadImage;
use crate::checklist::ResetChecklist;
use crate::error::Error;
use crate::tracker::FetchSchedule;

use super::AppState;

mod current_run;
mod models;
mod schedule;
mod version;

use models::*;

pub(super) fn build_api<F, L, C>() -> Router<Arc<AppState<F, L, C>>>
where
    F: FetchSchedule + 'static,
    L: LoadImage + 'static,
    C: ResetChecklist + 'static,
{
    Router::new()
        .route("/version", routing::get(version::get))
        .route("/schedule", routing::get(schedule::get))
        .route("/schedule/update", routing::post(schedule::update))
        .route("/current-run", routing::get(current_run::get))
        .route("/current-run/next", routing::post(current_run::next))
        .route("/current-run/previous", routing::post(current_run::previous))
        .route("/current-run/order/{order}", routing::put(current_run::set_by_order))
}
