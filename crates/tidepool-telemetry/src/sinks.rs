//! Pluggable event sinks.

use std::sync::{Arc, Mutex, PoisonError};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared, cloneable view of the events a [`VecSink`] has received.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl EventLog {
    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of events whose kind has the given label.
    pub fn count(&self, label: &str) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.kind.label() == label)
            .count()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, event: SimulationEvent) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

/// Collects events in memory for testing and inspection.
///
/// The sink is moved into the bus; keep its [`EventLog`] to read the
/// events afterwards.
#[derive(Debug, Default)]
pub struct VecSink {
    log: EventLog,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that stays valid after the sink is boxed into a bus.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.log.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing` at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let frame = event.frame;
        let label = event.kind.label();
        let kind = &event.kind;
        match self.level {
            tracing::Level::ERROR => tracing::error!(frame, label, event = ?kind, "simulation_event"),
            tracing::Level::WARN => tracing::warn!(frame, label, event = ?kind, "simulation_event"),
            tracing::Level::INFO => tracing::info!(frame, label, event = ?kind, "simulation_event"),
            tracing::Level::DEBUG => tracing::debug!(frame, label, event = ?kind, "simulation_event"),
            _ => tracing::trace!(frame, label, event = ?kind, "simulation_event"),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
