pub mod card;
pub mod pipeline;
pub mod report;
pub mod sentence;
pub mod speech;
