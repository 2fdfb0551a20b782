use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u32, message: String },
    #[error("No image returned: {0}")]
    NoImage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SkillError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SkillError::ResponseError(e.to_string())
        } else {
            SkillError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SkillError {
    fn from(e: serde_json::Error) -> Self {
        SkillError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;
