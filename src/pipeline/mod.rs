pub mod elapsed;
pub mod types;
pub mod view;

use std::io::Read;

use log::debug;

use crate::error::{PipeviewError, Result};
use types::PipelineInput;

pub use elapsed::{follow, PipelineTickers};
pub use types::Pipeline;
pub use view::{PipelineView, PLACEHOLDER};

/// Reads one pipeline record or an array of records as JSON.
pub fn read_pipelines(mut reader: impl Read) -> Result<Vec<Pipeline>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    if contents.trim().is_empty() {
        return Err(PipeviewError::Input("no pipeline data provided".to_string()));
    }

    let pipelines = serde_json::from_str::<PipelineInput>(&contents)?.into_vec();
    debug!("Read {} pipeline record(s)", pipelines.len());

    Ok(pipelines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_single_pipeline() {
        let pipelines = read_pipelines(r#"{"number": 3, "branch": "main"}"#.as_bytes()).unwrap();
        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].branch, "main");
    }

    #[test]
    fn test_read_pipeline_array() {
        let pipelines = read_pipelines(r#"[{"number": 1}, {"number": 2}]"#.as_bytes()).unwrap();
        assert_eq!(pipelines.len(), 2);
    }

    #[test]
    fn test_read_empty_input() {
        let result = read_pipelines("   \n".as_bytes());
        assert!(matches!(result, Err(PipeviewError::Input(_))));
    }

    #[test]
    fn test_read_invalid_json() {
        let result = read_pipelines("{not json".as_bytes());
        assert!(matches!(result, Err(PipeviewError::Json(_))));
    }
}
