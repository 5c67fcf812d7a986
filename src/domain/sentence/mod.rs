pub mod error;
pub mod model;
pub mod prompt;
pub mod service;

pub use error::SentenceServiceError;
pub use model::{GeneratedSentence, SentenceMode};
pub use service::{SentenceService, SentenceServiceApi};
