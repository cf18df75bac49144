//! Diagnostic events
//!
//! Components report what they are doing through an injected [`Diagnostics`]
//! handle instead of a process-global logger. The binary wires it to
//! `tracing`; tests record events in memory or drop them.

use std::sync::{Arc, Mutex};

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: Level,
    /// Emitting component (e.g. "transport", "orders")
    pub component: &'static str,
    pub message: String,
}

/// Receiver of diagnostic events
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Forwards events to the `tracing` subscriber installed by the entry point
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &Event) {
        let component = event.component;
        match event.level {
            Level::Debug => tracing::debug!(component, "{}", event.message),
            Level::Info => tracing::info!(component, "{}", event.message),
            Level::Warn => tracing::warn!(component, "{}", event.message),
            Level::Error => tracing::error!(component, "{}", event.message),
        }
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _event: &Event) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events at exactly `level`
    pub fn at_level(&self, level: Level) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: &Event) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// Cheaply clonable handle to a diagnostic sink
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl Diagnostics {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink))
    }

    pub fn emit(&self, level: Level, component: &'static str, message: impl Into<String>) {
        self.sink.emit(&Event {
            level,
            component,
            message: message.into(),
        });
    }

    pub fn debug(&self, component: &'static str, message: impl Into<String>) {
        self.emit(Level::Debug, component, message);
    }

    pub fn info(&self, component: &'static str, message: impl Into<String>) {
        self.emit(Level::Info, component, message);
    }

    pub fn warn(&self, component: &'static str, message: impl Into<String>) {
        self.emit(Level::Warn, component, message);
    }

    pub fn error(&self, component: &'static str, message: impl Into<String>) {
        self.emit(Level::Error, component, message);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::silent()
    }
}
