use chrono::{DateTime, Local};
use serde::Serialize;

use super::types::Pipeline;
use crate::date::DateFormatter;
use crate::emoji::convert_emojis;

/// Shown in place of a time value that is not available yet.
pub const PLACEHOLDER: &str = "—";

const TAG_REF_PREFIX: &str = "refs/tags/";
const ONE_HOUR_MS: i64 = 60 * 60 * 1000;

/// Creation time in epoch milliseconds, `0` when unknown or out of range.
pub fn since_raw(pipeline: &Pipeline) -> i64 {
    pipeline
        .created_at
        .and_then(|created| created.checked_mul(1000))
        .unwrap_or(0)
}

/// Whether a pipeline created at `since_ms` is less than an hour old.
pub fn is_young(since_ms: i64, now_ms: i64) -> bool {
    since_ms > 0 && now_ms.saturating_sub(since_ms) <= ONE_HOUR_MS
}

/// Run time in milliseconds, `0` when the pipeline has not started or has
/// no end timestamp. Running pipelines are measured against `now_ms`.
/// Timestamps too large to express in milliseconds count as missing.
pub fn duration_raw(pipeline: &Pipeline, now_ms: i64) -> i64 {
    let start = pipeline.started_at.unwrap_or(0);
    let end = pipeline
        .finished_at
        .filter(|&t| t != 0)
        .or(pipeline.updated_at)
        .unwrap_or(0);

    if start == 0 || end == 0 {
        return 0;
    }

    let duration = if pipeline.is_running() {
        start
            .checked_mul(1000)
            .and_then(|start_ms| now_ms.checked_sub(start_ms))
    } else {
        end.checked_sub(start).and_then(|secs| secs.checked_mul(1000))
    };

    duration.unwrap_or(0)
}

/// Current values of the two time inputs of a view, either a snapshot or
/// the latest readings of live tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveValues {
    /// Creation time in epoch milliseconds; "ago" is measured against the
    /// formatter's clock
    pub since: Option<i64>,
    /// Run time in milliseconds
    pub duration: Option<i64>,
}

impl LiveValues {
    pub fn snapshot(pipeline: &Pipeline, now_ms: i64) -> Self {
        Self {
            since: Some(since_raw(pipeline)),
            duration: Some(duration_raw(pipeline, now_ms)),
        }
    }
}

/// Display strings for one pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineView {
    pub number: u64,
    pub status: &'static str,
    pub since: String,
    pub duration: String,
    pub message: String,
    pub short_message: String,
    pub pr_title: String,
    pub pr_title_with_description: String,
    pub pretty_ref: String,
    pub created: Option<String>,
}

impl PipelineView {
    /// Derives the view from a record and the current time inputs.
    pub fn compose(pipeline: &Pipeline, formatter: &DateFormatter, live: LiveValues) -> Self {
        let since = match live.since {
            Some(since) if since_raw(pipeline) != 0 => formatter.time_ago(since),
            _ => PLACEHOLDER.to_string(),
        };

        let duration = match live.duration {
            Some(duration) if duration_raw(pipeline, formatter.now_millis()) != 0 => {
                formatter.pretty_duration(duration)
            }
            _ => PLACEHOLDER.to_string(),
        };

        let message = convert_emojis(&pipeline.message);
        let pr_title_with_description = convert_emojis(&pipeline.title);

        Self {
            number: pipeline.number,
            status: pipeline.status.as_str(),
            since,
            duration,
            short_message: first_line(&message).to_string(),
            message,
            pr_title: first_line(&pr_title_with_description).to_string(),
            pr_title_with_description,
            pretty_ref: pretty_ref(pipeline),
            created: created(pipeline, formatter),
        }
    }

    /// Derives the view using the formatter's clock for every time input.
    pub fn render(pipeline: &Pipeline, formatter: &DateFormatter) -> Self {
        let live = LiveValues::snapshot(pipeline, formatter.now_millis());
        Self::compose(pipeline, formatter, live)
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

/// Tag name for tag and release pipelines, the branch otherwise.
pub fn pretty_ref(pipeline: &Pipeline) -> String {
    if pipeline.event.is_tag_like() {
        pipeline.ref_.replace(TAG_REF_PREFIX, "")
    } else {
        pipeline.branch.clone()
    }
}

fn created(pipeline: &Pipeline, formatter: &DateFormatter) -> Option<String> {
    let created_at = pipeline.created_at.filter(|&t| t != 0)?;
    let date = DateTime::from_timestamp(created_at, 0)?;
    Some(formatter.to_locale_string(&date.with_timezone(&Local)))
}
