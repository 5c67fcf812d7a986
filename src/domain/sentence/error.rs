use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SentenceServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid response: {reason}")]
    Format {
        reason: String,
        raw_response: Option<String>,
    },
}

impl From<SentenceServiceError> for AppError {
    fn from(err: SentenceServiceError) -> Self {
        match err {
            SentenceServiceError::Dependency(msg) => AppError::Generation(msg),
            SentenceServiceError::Format {
                reason,
                raw_response,
            } => AppError::GenerationFormat {
                reason,
                raw_response,
            },
        }
    }
}
