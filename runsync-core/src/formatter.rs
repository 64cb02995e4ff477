use std::collections::HashMap;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;
use itertools::Itertools;

use crate::boxart::BoxartTemplate;
use crate::error::Error;
use crate::models::*;
use crate::tracker::RunRecord;
use crate::tracker::RunnerRecord;
use crate::tracker::TrackerRecords;

const UNKNOWN: &str = "Unknown";
const DEFAULT_CATEGORY: &str = "Any%";

/// Joins runner records into run records.
///
/// The output depends only on the input records so that two schedules built
/// from the same tracker data compare equal.
pub struct ScheduleFormatter {
    template: BoxartTemplate,
}

impl ScheduleFormatter {
    pub fn new(template: BoxartTemplate) -> Self {
        ScheduleFormatter { template }
    }

    pub fn format(&self, records: &TrackerRecords) -> Result<Schedule, Error> {
        let runners: HashMap<u64, Runner> = records
            .runners
            .iter()
            .map(|record| (record.pk, make_runner(record)))
            .collect();

        // Runs are positioned by `order`, not by the order they are listed.
        records
            .runs
            .iter()
            .sorted_by_key(|record| record.fields.order)
            .enumerate()
            .map(|(index, record)| self.format_run(index, record, &runners))
            .collect()
    }

    fn format_run(
        &self,
        index: usize,
        record: &RunRecord,
        runners: &HashMap<u64, Runner>,
    ) -> Result<Run, Error> {
        let fields = &record.fields;

        // Orders must be 1, 2, 3, ... without gaps or duplicates.
        let order = match fields.order {
            Some(order) if order as usize == index + 1 => order,
            order => return Err(Error::InconsistentOrder { index, order }),
        };

        let run_runners = fields
            .runners
            .iter()
            .map(|id| {
                let runner = runners.get(id).cloned();
                if runner.is_none() {
                    tracing::warn!(run.order = order, runner.id = id, "Unknown runner");
                }
                runner
            })
            .collect_vec();

        let concatenated_runners = run_runners
            .iter()
            .flatten()
            .map(|runner| &runner.name)
            .join(", ");

        // The boxart URL is built from the raw name, even if it's missing.
        let raw_name = fields.name.as_deref().unwrap_or_default();

        Ok(Run {
            name: or_default(&fields.name, UNKNOWN),
            console: or_default(&fields.console, UNKNOWN),
            commentators: or_default(&fields.commentators, UNKNOWN),
            category: or_default(&fields.category, DEFAULT_CATEGORY),
            start_time: fields.starttime.as_deref().and_then(parse_start_time),
            order,
            estimate: or_default(&fields.run_time, UNKNOWN),
            release_year: fields.release_year,
            runners: run_runners,
            concatenated_runners,
            boxart: Boxart {
                url: self.template.url_of(raw_name),
                base64: None,
            },
            run_type: RunType::Run,
        })
    }
}

fn make_runner(record: &RunnerRecord) -> Runner {
    Runner {
        name: record.fields.name.clone(),
        stream: record
            .fields
            .stream
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    // No offset means UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.and_utc())
}

// </coverage:exclude>
