//! Thread-safe, timestamped ENTRA/SALE event logging.
//!
//! The event log is the simulation's only observable wire format when
//! enabled: one line per stage transition, written whole or not at all.
//! Operational diagnostics go through `tracing` instead.

use crate::stage::StageId;
use crate::vehicle::Vehicle;
use std::io::{self, Write};
use std::time::Instant;

/// State token recorded when a vehicle crosses a stage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Vehicle acquired a capacity slot ("ENTRA").
    Enter,
    /// Vehicle released its capacity slot ("SALE").
    Exit,
}

impl Transition {
    /// Token used in event lines.
    pub fn token(&self) -> &'static str {
        match self {
            Transition::Enter => "ENTRA",
            Transition::Exit => "SALE",
        }
    }
}

/// Destination for formatted event lines.
///
/// Implementations must keep each line whole under concurrent writers;
/// ordering between lines carries no meaning.
pub trait EventSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Sink writing each event line to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn write_line(&self, line: &str) {
        // A single locked write keeps the line whole under concurrency.
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{line}");
    }
}

/// Timestamped event logger shared by every stage of a run.
///
/// Constructed with an enabled flag and an elapsed-time anchor captured at
/// construction. A disabled logger drops events without formatting them.
pub struct EventLog {
    enabled: bool,
    start: Instant,
    sink: std::sync::Arc<dyn EventSink>,
}

impl EventLog {
    /// Logger writing to stdout. The elapsed-time anchor starts here.
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, std::sync::Arc::new(StdoutSink))
    }

    /// Logger writing to a caller-supplied sink.
    pub fn with_sink(enabled: bool, sink: std::sync::Arc<dyn EventSink>) -> Self {
        Self {
            enabled,
            start: Instant::now(),
            sink,
        }
    }

    /// Whether event lines are being emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Record one stage transition. No-op when the logger is disabled.
    ///
    /// Line format, elapsed truncated to millisecond granularity:
    /// `Time <s>.<ms>s | Vehicle <id> | Incident <incident> | Stage <name> | <ENTRA|SALE> | Category <letter>`
    pub fn record(&self, vehicle: &Vehicle, stage: StageId, transition: Transition) {
        if !self.enabled {
            return;
        }
        let elapsed = self.start.elapsed();
        let line = format!(
            "Time {}.{:03}s | Vehicle {} | Incident {} | Stage {} | {} | Category {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            vehicle.id,
            vehicle.incident,
            stage,
            transition.token(),
            vehicle.category,
        );
        self.sink.write_line(&line);
    }
}
