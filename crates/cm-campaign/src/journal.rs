//! The adventure log and its exports.

use serde::{Deserialize, Serialize};

use cm_mechanics::LogEntry;

/// A chronological log of everything that happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Append several entries in order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.entries.extend(entries);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries.
    pub fn tail(&self, n: usize) -> &[LogEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as markdown, one section per day.
    pub fn export_markdown(&self, title: &str) -> String {
        let mut out = format!("# {title}\n");
        let mut day = None;
        for entry in &self.entries {
            if day != Some(entry.day) {
                out.push_str(&format!("\n## Day {}\n\n", entry.day));
                day = Some(entry.day);
            }
            out.push_str(&format!("- {}\n", entry.text));
        }
        out
    }

    /// Export as plain text, one line per entry.
    pub fn export_text(&self, title: &str) -> String {
        let mut out = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));
        for entry in &self.entries {
            out.push_str(&format!("{entry}\n"));
        }
        out
    }
}

impl From<Vec<LogEntry>> for Journal {
    fn from(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }
}
