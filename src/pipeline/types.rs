use serde::{Deserialize, Serialize};

/// Lifecycle state of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Created,
    Pending,
    Running,
    Success,
    Failure,
    Killed,
    Error,
    Blocked,
    Declined,
    Skipped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Killed => "killed",
            Self::Error => "error",
            Self::Blocked => "blocked",
            Self::Declined => "declined",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }
}

/// Event that triggered a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEvent {
    Push,
    PullRequest,
    PullRequestClosed,
    Tag,
    Release,
    Deployment,
    Cron,
    Manual,
    #[default]
    #[serde(other)]
    Other,
}

impl PipelineEvent {
    /// Whether `ref` points at a tag rather than a branch.
    pub fn is_tag_like(self) -> bool {
        matches!(self, Self::Tag | Self::Release)
    }
}

/// A single pipeline record as delivered by the CI server.
///
/// Timestamps are epoch seconds; a missing or zero timestamp means the
/// pipeline has not reached that point yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub number: u64,
    pub created_at: Option<i64>,
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub status: PipelineStatus,
    pub event: PipelineEvent,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub branch: String,
    pub message: String,
    pub title: String,
}

impl Pipeline {
    pub fn is_running(&self) -> bool {
        self.status == PipelineStatus::Running
    }
}

/// Reads either a single pipeline object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum PipelineInput {
    Many(Vec<Pipeline>),
    One(Box<Pipeline>),
}

impl PipelineInput {
    pub(crate) fn into_vec(self) -> Vec<Pipeline> {
        match self {
            Self::Many(pipelines) => pipelines,
            Self::One(pipeline) => vec![*pipeline],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "number": 42,
            "created_at": 1700000000,
            "started_at": 1700000010,
            "finished_at": 1700000130,
            "updated_at": 1700000130,
            "status": "success",
            "event": "tag",
            "ref": "refs/tags/v1.0",
            "branch": "main",
            "message": "Release :rocket:",
            "title": ""
        }"#;

        let pipeline: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(pipeline.number, 42);
        assert_eq!(pipeline.started_at, Some(1_700_000_010));
        assert_eq!(pipeline.status, PipelineStatus::Success);
        assert_eq!(pipeline.event, PipelineEvent::Tag);
        assert_eq!(pipeline.ref_, "refs/tags/v1.0");
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let pipeline: Pipeline = serde_json::from_str(r#"{"branch": "dev"}"#).unwrap();
        assert_eq!(pipeline.created_at, None);
        assert_eq!(pipeline.status, PipelineStatus::Unknown);
        assert_eq!(pipeline.event, PipelineEvent::Other);
        assert_eq!(pipeline.branch, "dev");
        assert!(pipeline.message.is_empty());
    }

    #[test]
    fn test_deserialize_unknown_enums() {
        let pipeline: Pipeline =
            serde_json::from_str(r#"{"status": "exploded", "event": "pull_request_metadata"}"#)
                .unwrap();
        assert_eq!(pipeline.status, PipelineStatus::Unknown);
        assert_eq!(pipeline.event, PipelineEvent::Other);
    }

    #[test]
    fn test_pipeline_input_one_or_many() {
        let one: PipelineInput = serde_json::from_str(r#"{"number": 1}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: PipelineInput =
            serde_json::from_str(r#"[{"number": 1}, {"number": 2}]"#).unwrap();
        let pipelines = many.into_vec();
        assert_eq!(pipelines.len(), 2);
        assert_eq!(pipelines[1].number, 2);
    }

    #[test]
    fn test_event_is_tag_like() {
        assert!(PipelineEvent::Tag.is_tag_like());
        assert!(PipelineEvent::Release.is_tag_like());
        assert!(!PipelineEvent::Push.is_tag_like());
    }
}
