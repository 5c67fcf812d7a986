use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Separator between note fields in the `flds` column.
pub const FIELD_SEPARATOR: char = '\x1f';

/// Review history attached to a card, from its most recent revlog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPerformance {
    pub last_interval: i64,
    pub ease: i64,
    pub flags: i64,
}

/// A review card due today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueCard {
    pub id: i64,
    /// The note's `flds` column as stored, separators included
    pub raw_fields: String,
    pub fields: Vec<String>,
    pub performance: Option<CardPerformance>,
}

impl DueCard {
    pub fn new(id: i64, raw_fields: &str, performance: Option<CardPerformance>) -> Self {
        Self {
            id,
            raw_fields: raw_fields.to_string(),
            fields: split_fields(raw_fields),
            performance,
        }
    }
}

pub fn split_fields(raw: &str) -> Vec<String> {
    raw.split(FIELD_SEPARATOR).map(str::to_string).collect()
}

/// Days elapsed between the collection's creation anchor and `now`.
///
/// This is the collection's notion of "today" that review cards store in
/// their `due` column, not the calendar date.
pub fn days_since_creation(crt: i64, now: i64) -> i64 {
    (now - crt).div_euclid(SECONDS_PER_DAY)
}
