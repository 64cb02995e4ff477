use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::SERVER;
use axum::routing;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::boxart::LoadImage;
use crate::checklist::Checklist;
use crate::checklist::ResetChecklist;
use crate::config::Config;
use crate::error::Error;
use crate::schedule::PollerHandle;
use crate::tracker::FetchSchedule;

mod api;
mod error;
mod server;
mod sse;


pub async fn serve<F, L, C>(
    config: Arc<Config>,
    poller: PollerHandle<F, L, C>,
    checklist: Checklist,
) -> Result<(), Error>
where
    F: FetchSchedule + 'static,
    L: LoadImage + 'static,
    C: ResetChecklist + 'static,
{
    let app = build_app().with_state(Arc::new(AppState { poller, checklist }));
    server::serve(config, app).await
}

// endpoints

fn build_app<F, L, C>() -> Router<Arc<AppState<F, L, C>>>
where
    F: FetchSchedule + 'static,
    L: LoadImage + 'static,
    C: ResetChecklist + 'static,
{
    Router::new()
        .nest("/api", api::build_api())
        .route("/events", routing::get(sse::events))
        // Disable caching.
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            SERVER,
            HeaderValue::from_static(SERVER_NAME),
        ))
        // Output tracing logs.
        .layer(TraceLayer::new_for_http())
}

// state

struct AppState<F, L, C> {
    poller: PollerHandle<F, L, C>,
    checklist: Checklist,
}

// helpers

const SERVER_NAME: &str = concat!("runsync/", env!("CARGO_PKG_VERSION"));
