/// Main application error type.
///
/// Every variant is terminal for a run: the pipeline never converts one of
/// these into a per-card skip.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Card store unavailable: {0}")]
    SourceUnavailable(String),

    #[error("No review cards are due today (collection day {day})")]
    EmptyResult { day: i64 },

    #[error("Sentence generation failed: {0}")]
    Generation(String),

    #[error("Sentence generation returned an invalid response: {reason}")]
    GenerationFormat {
        reason: String,
        raw_response: Option<String>,
    },

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Raw reply from an external service, when one was received.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::GenerationFormat { raw_response, .. } => raw_response.as_deref(),
            _ => None,
        }
    }

    /// Process exit code for this error.
    ///
    /// Nothing being due is a normal outcome for a daily run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyResult { .. } => 0,
            _ => 1,
        }
    }

    /// Log the error with whatever diagnostic context it carries.
    pub fn log(&self) {
        match self {
            Self::EmptyResult { day } => {
                tracing::warn!(
                    day = day,
                    "No rows were returned from the collection. Either no review cards are due today, \
                     or the deck filter, the system clock or the collection layout does not match"
                );
            }
            Self::GenerationFormat {
                reason,
                raw_response,
            } => {
                tracing::error!(
                    error = %self,
                    reason = %reason,
                    raw_response = raw_response.as_deref().unwrap_or("<none>"),
                    "Run aborted"
                );
            }
            _ => {
                tracing::error!(error = %self, error_debug = ?self, "Run aborted");
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::SourceUnavailable(err.to_string())
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
