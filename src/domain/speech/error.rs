use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Dependency(msg) => AppError::Synthesis(msg),
            SpeechServiceError::Io(e) => AppError::Io(e),
        }
    }
}
