//! In-memory fakes for test use
//!
//! Provides `MemorySink`, an [`EventSink`] that retains every event line so
//! tests can assert on counts and ordering without capturing stdout.

use crate::log::EventSink;
use std::sync::Mutex;

/// Event sink backed by a `Mutex<Vec<String>>`.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut lines = self.lines.lock().unwrap();
        lines.push(line.to_string());
    }
}
