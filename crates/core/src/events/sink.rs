//! Where services send their domain events.

use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::DomainEvent;

/// Receiver of domain events.
///
/// Called once a write has been stored; a sink cannot fail the write that
/// produced the event.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Writes every event to the log as JSON. Used by the reporter, which has no
/// other consumer for events.
#[derive(Clone, Default)]
pub struct LogDomainEventSink;

impl DomainEventSink for LogDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => info!("Domain event: {}", json),
            Err(e) => warn!("Domain event could not be serialized: {:?} ({})", event, e),
        }
    }
}

/// Keeps the events in emission order so service tests can check that a
/// regeneration, confirmation or capacity change was announced.
#[derive(Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded().clone()
    }

    /// Removes and returns what was recorded so far.
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.recorded())
    }

    pub fn len(&self) -> usize {
        self.recorded().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded().is_empty()
    }
}

impl DomainEventSink for RecordingEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded().push(event);
    }
}
