use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgriError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid crop profile: {0}")]
    InvalidProfile(String),

    #[error("Insufficient moisture history: need {required} readings, have {available}")]
    InsufficientHistory { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, AgriError>;
