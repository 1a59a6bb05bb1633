use crate::error::AppError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PodcastServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("a podcast is already being generated")]
    Busy,
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("{step} timed out after {timeout:?}")]
    Timeout {
        step: &'static str,
        timeout: Duration,
    },
}

impl From<PodcastServiceError> for AppError {
    fn from(err: PodcastServiceError) -> Self {
        match err {
            PodcastServiceError::Invalid(msg) => AppError::BadRequest(msg),
            PodcastServiceError::Busy => AppError::Conflict(err.to_string()),
            PodcastServiceError::Dependency(msg) => AppError::ExternalService(msg),
            PodcastServiceError::Timeout { .. } => AppError::ExternalService(err.to_string()),
        }
    }
}
