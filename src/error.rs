use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipeviewError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipeviewError>;
