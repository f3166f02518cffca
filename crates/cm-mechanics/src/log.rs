//! Adventure log entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of the adventure log, stamped with the in-game day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry id.
    pub id: Uuid,
    /// In-game day the entry was written.
    pub day: u32,
    /// Log text.
    pub text: String,
}

impl LogEntry {
    /// Create an entry with a fresh id.
    pub fn new(day: u32, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            text: text.into(),
        }
    }

    /// Wrap several lines written on the same day.
    pub fn batch<I, S>(day: u32, lines: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines.into_iter().map(|l| Self::new(day, l)).collect()
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {}: {}", self.day, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = LogEntry::new(1, "a");
        let b = LogEntry::new(1, "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn batch_and_display() {
        let entries = LogEntry::batch(3, ["one", "two"]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].to_string(), "Day 3: two");
    }
}
