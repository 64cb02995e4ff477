use std::sync::Arc;

use tokio::signal::unix::SignalKind;
use tokio::signal::unix::signal;

use runsync_core::boxart::BoxartResolver;
use runsync_core::boxart::BoxartTemplate;
use runsync_core::boxart::HttpImageLoader;
use runsync_core::checklist::Checklist;
use runsync_core::config::Config;
use runsync_core::error::Error;
use runsync_core::formatter::ScheduleFormatter;
use runsync_core::schedule::CurrentRunController;
use runsync_core::schedule::SchedulePoller;
use runsync_core::schedule::ScheduleState;
use runsync_core::schedule::ScheduleSync;
use runsync_core::tracker::TrackerClient;
use runsync_core::web;

pub async fn main(config: Arc<Config>) {
    let mut sigint = signal(SignalKind::interrupt()).unwrap();
    let mut sigterm = signal(SignalKind::terminate()).unwrap();

    tokio::select! {
        result = serve(config) => {
            if let Err(err) = result {
                tracing::error!(%err);
            }
        }
        _ = sigint.recv() => {
            tracing::info!("SIGINT received");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received");
        }
    }

    tracing::info!("Stopping...");
}

async fn serve(config: Arc<Config>) -> Result<(), Error> {
    let state = Arc::new(ScheduleState::new());
    let checklist = Checklist::new();

    let resolver = BoxartResolver::new(Arc::new(config.boxart.clone()), HttpImageLoader::new())?;
    let controller = Arc::new(CurrentRunController::new(
        state.clone(),
        resolver,
        checklist.clone(),
    ));

    let fetcher = TrackerClient::new(Arc::new(config.tracker.clone()));
    let formatter = ScheduleFormatter::new(BoxartTemplate::new(&config.boxart));
    let sync = Arc::new(ScheduleSync::new(fetcher, formatter, state, controller));

    let poller = SchedulePoller::new(sync, config.tracker.poll_interval);
    let handle = poller.handle();
    tokio::spawn(poller.run());

    web::serve(config, handle, checklist).await
}
