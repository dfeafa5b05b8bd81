//! RecordingLog: keeps every transition log line for inspection.

use crate::runtime::TransitionLog;
use crate::screen::Screen;
use std::sync::{Mutex, PoisonError};

/// One recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The label, e.g. `"Activating"`.
    pub label: String,
    /// Name of the screen the line was about.
    pub screen: String,
}

/// A [`TransitionLog`] that records instead of printing.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all recorded lines.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded lines rendered as `"<label> <screen>"`.
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| format!("{} {}", entry.label, entry.screen))
            .collect()
    }
}

impl TransitionLog for RecordingLog {
    fn log(&self, label: &str, screen: &dyn Screen) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                label: label.to_owned(),
                screen: screen.name().to_owned(),
            });
    }
}
