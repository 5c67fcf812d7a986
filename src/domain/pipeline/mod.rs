pub mod service;

pub use service::{RunSummary, StudyPipeline};
