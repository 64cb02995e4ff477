use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::Event;
use axum::response::sse::Sse;
use futures::stream;
use futures::stream::Stream;
use futures::stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::WatchStream;

use crate::boxart::LoadImage;
use crate::checklist::ResetChecklist;
use crate::tracker::FetchSchedule;

use super::AppState;

const SCHEDULE_UPDATED: &str = "schedule-updated";
const CURRENT_RUN_CHANGED: &str = "current-run-changed";
const CHECKLIST_RESET: &str = "checklist-reset";

/// Streams changes of the published state.
///
/// Each event carries the new value as its data.
pub(super) async fn events<F, L, C>(
    State(state): State<Arc<AppState<F, L, C>>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>>
where
    F: FetchSchedule,
    L: LoadImage,
    C: ResetChecklist,
{
    let published = state.poller.sync().state();

    let schedule_updated = WatchStream::from_changes(published.schedule.subscribe())
        .map(|versioned| Event::default().event(SCHEDULE_UPDATED).json_data(versioned.value));

    let current_run_changed = WatchStream::from_changes(published.current_run.subscribe())
        .map(|versioned| Event::default().event(CURRENT_RUN_CHANGED).json_data(versioned.value));

    let checklist_reset = BroadcastStream::new(state.checklist.subscribe())
        .filter_map(|result| async move {
            if let Err(ref err) = result {
                tracing::warn!(%err, "Checklist events lagged");
            }
            result.ok()
        })
        .map(|_| Ok::<_, axum::Error>(Event::default().event(CHECKLIST_RESET).data("{}")));

    let events = stream::select(
        schedule_updated,
        stream::select(current_run_changed, checklist_reset),
    );

    Sse::new(events).keep_alive(Default::default())
}
