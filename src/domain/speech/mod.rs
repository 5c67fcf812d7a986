pub mod annotation;
pub mod error;
pub mod model;
pub mod service;

pub use annotation::{speech_text, strip_annotations};
pub use error::SpeechServiceError;
pub use model::{audio_file_name, AudioArtifact, AudioFormat};
pub use service::{SpeechService, SpeechServiceApi};
