use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

/// A runner taking part in a run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Runner {
    pub name: String,
    /// Channel identifier, e.g. `alice` for `twitch.tv/alice`.
    pub stream: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxart {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    #[default]
    Run,
}

/// A run in the schedule.
///
/// `order` is 1-based and equals the position of the run in the schedule
/// plus one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub name: String,
    pub console: String,
    pub commentators: String,
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    pub order: u32,
    pub estimate: String,
    pub release_year: Option<i32>,
    /// `None` for a runner ID unknown to the tracker.
    pub runners: Vec<Option<Runner>>,
    pub concatenated_runners: String,
    pub boxart: Boxart,
    #[serde(rename = "type")]
    pub run_type: RunType,
}

impl Run {
    /// Index of the following run in the schedule.
    pub fn next_index(&self) -> usize {
        self.order as usize
    }
}

pub type Schedule = Vec<Run>;

/// The run presently active, with a snapshot of the run following it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRun {
    #[serde(flatten)]
    pub run: Run,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run: Option<Run>,
}

impl std::ops::Deref for CurrentRun {
    type Target = Run;

    fn deref(&self) -> &Self::Target {
        &self.run
    }
}

// <coverage:exclude>
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_current_run_json() {
        let run = Run {
            name: "Game A".to_string(),
            console: "SNES".to_string(),
            commentators: "Unknown".to_string(),
            category: "Any%".to_string(),
            start_time: DateTime::from_timestamp_millis(1_451_838_600_000),
            order: 1,
            estimate: "0:30:00".to_string(),
            release_year: Some(1991),
            runners: vec![
                Some(Runner {
                    name: "Alice".to_string(),
                    stream: "alice".to_string(),
                }),
                None,
            ],
            concatenated_runners: "Alice".to_string(),
            boxart: Boxart {
                url: "http://cdn.test/Game A-469x655.jpg".to_string(),
                base64: Some("AAAA".to_string()),
            },
            run_type: RunType::Run,
        };
        let current = CurrentRun {
            run,
            next_run: None,
        };
        assert_eq!(
            serde_json::to_value(&current).unwrap(),
            json!({
                "name": "Game A",
                "console": "SNES",
                "commentators": "Unknown",
                "category": "Any%",
                "startTime": 1_451_838_600_000i64,
                "order": 1,
                "estimate": "0:30:00",
                "releaseYear": 1991,
                "runners": [{"name": "Alice", "stream": "alice"}, null],
                "concatenatedRunners": "Alice",
                "boxart": {
                    "url": "http://cdn.test/Game A-469x655.jpg",
                    "base64": "AAAA",
                },
                "type": "run",
            })
        );
        assert_eq!(current.next_index(), 1);
    }
}
// </coverage:exclude>
