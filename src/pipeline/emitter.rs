use std::sync::Mutex;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::mpsc::UnboundedSender;
use crate::models::{LogEntry, LogLevel};

/// Destination for progress events. Delivery is fire-and-forget.
pub trait LogSink: Send + Sync {
    fn emit(&self, entry: LogEntry);
}

impl LogSink for UnboundedSender<LogEntry> {
    fn emit(&self, entry: LogEntry) {
        // A closed receiver means the client went away; the producer keeps going.
        let _ = self.send(entry);
    }
}

/// Stamps entries with RFC 3339 millisecond timestamps that never go backwards.
pub struct LogEmitter<'a> {
    sink: &'a dyn LogSink,
    last: Mutex<Option<DateTime<Utc>>>,
}

impl<'a> LogEmitter<'a> {
    pub fn new(sink: &'a dyn LogSink) -> Self {
        Self { sink, last: Mutex::new(None) }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let timestamp = self.stamp(Utc::now());
        self.sink.emit(LogEntry::new(timestamp, message, level));
    }

    fn stamp(&self, candidate: DateTime<Utc>) -> String {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let at = match *last {
            Some(prev) if prev > candidate => prev,
            _ => candidate,
        };
        *last = Some(at);
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Forwarding through an emitter re-clamps entries produced by a nested emitter.
impl LogSink for LogEmitter<'_> {
    fn emit(&self, entry: LogEntry) {
        let candidate = DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        let timestamp = self.stamp(candidate);
        self.sink.emit(LogEntry { timestamp, ..entry });
    }
}

/// Collects entries in memory.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, entry: LogEntry) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).push(entry);
    }
}
