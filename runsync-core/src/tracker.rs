use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::TrackerConfig;
use crate::error::Error;

/// Raw records obtained from the tracker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerRecords {
    pub runners: Vec<RunnerRecord>,
    pub runs: Vec<RunRecord>,
}

#[async_trait]
pub trait FetchSchedule: Send + Sync {
    async fn fetch(&self) -> Result<TrackerRecords, Error>;
}

// models

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RunnerRecord {
    pub pk: u64,
    pub fields: RunnerFields,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RunnerFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stream: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RunRecord {
    #[serde(default)]
    pub pk: Option<u64>,
    pub fields: RunFields,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RunFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub console: Option<String>,
    #[serde(default)]
    pub commentators: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub starttime: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub run_time: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub runners: Vec<u64>,
}

// client

/// Reads runner and run listings from the tracker's search endpoint.
pub struct TrackerClient {
    config: Arc<TrackerConfig>,
    client: reqwest::Client,
}

impl TrackerClient {
    pub fn new(config: Arc<TrackerConfig>) -> Self {
        TrackerClient {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn search<T: DeserializeOwned>(&self, record_type: &str) -> Result<Vec<T>, Error> {
        let event = self.config.event.to_string();
        let body = self
            .client
            .get(&self.config.url)
            .query(&[("type", record_type), ("event", event.as_str())])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let records = serde_json::from_slice(&body)?;
        Ok(records)
    }
}

#[async_trait]
impl FetchSchedule for TrackerClient {
    async fn fetch(&self) -> Result<TrackerRecords, Error> {
        let (runners, runs) = tokio::try_join!(self.search("runner"), self.search("run"))?;
        tracing::debug!(
            tracker.event = self.config.event,
            runners.len = runners.len(),
            runs.len = runs.len(),
            "Fetched",
        );
        Ok(TrackerRecords { runners, runs })
    }
}

// </coverage:exclude>
