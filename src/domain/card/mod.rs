pub mod model;

pub use model::{days_since_creation, CardPerformance, DueCard, SECONDS_PER_DAY};
