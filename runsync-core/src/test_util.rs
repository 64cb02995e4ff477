use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::net::TcpListener;

use crate::boxart::BoxartTemplate;
use crate::boxart::DEFAULT_FALLBACK_IMAGE;
use crate::boxart::stub::ImageLoaderStub;
use crate::config::BoxartConfig;
use crate::config::PlaceholderConfig;
use crate::formatter::ScheduleFormatter;
use crate::models::Schedule;
use crate::tracker::RunFields;
use crate::tracker::RunRecord;
use crate::tracker::RunnerFields;
use crate::tracker::RunnerRecord;
use crate::tracker::TrackerRecords;

pub(crate) async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub(crate) fn runner_record(pk: u64, name: &str) -> RunnerRecord {
    RunnerRecord {
        pk,
        fields: RunnerFields {
            name: name.to_string(),
            stream: format!("twitch.tv/{}", name.to_lowercase()),
        },
    }
}

pub(crate) fn run_record(name: &str, order: u32, runners: &[u64]) -> RunRecord {
    RunRecord {
        pk: Some(order as u64 + 100),
        fields: RunFields {
            name: Some(name.to_string()),
            console: Some("SNES".to_string()),
            order: Some(order),
            runners: runners.to_vec(),
            ..Default::default()
        },
    }
}

pub(crate) const PLACEHOLDER_URL: &str = "http://cdn.test/404_boxart.jpg";
pub(crate) const PLACEHOLDER_IMAGE: &[u8] = b"no boxart";

pub(crate) fn boxart_config() -> Arc<BoxartConfig> {
    Arc::new(BoxartConfig {
        url_template: "http://cdn.test/{name}.jpg".to_string(),
        placeholder: Some(PlaceholderConfig::Url(PLACEHOLDER_URL.to_string())),
        ..Default::default()
    })
}

pub(crate) fn boxart_url(name: &str) -> String {
    format!("http://cdn.test/{name}.jpg")
}

/// Tracker records with one runner per run.
pub(crate) fn records(names: &[&str]) -> TrackerRecords {
    TrackerRecords {
        runners: (1..=names.len() as u64)
            .map(|pk| runner_record(pk, &format!("Runner{pk}")))
            .collect(),
        runs: names
            .iter()
            .enumerate()
            .map(|(i, name)| run_record(name, i as u32 + 1, &[i as u64 + 1]))
            .collect(),
    }
}

pub(crate) fn schedule(names: &[&str]) -> Schedule {
    ScheduleFormatter::new(BoxartTemplate::new(&boxart_config()))
        .format(&records(names))
        .unwrap()
}

/// Serves `image of <name>` for each name, and the placeholder.
pub(crate) fn image_loader(names: &[&str]) -> ImageLoaderStub {
    let loader = ImageLoaderStub::default();
    loader.insert(PLACEHOLDER_URL, PLACEHOLDER_IMAGE);
    for name in names {
        loader.insert(&boxart_url(name), format!("image of {name}").into_bytes());
    }
    loader
}

pub(crate) fn encoded_image_of(name: &str) -> String {
    STANDARD.encode(format!("image of {name}"))
}

pub(crate) fn encoded_fallback_image() -> String {
    STANDARD.encode(DEFAULT_FALLBACK_IMAGE)
}
