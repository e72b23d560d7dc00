//! Domain event and error sink traits and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use log::error;

use super::DomainEvent;
use crate::errors::Error;

/// Trait for receiving domain events.
///
/// The goal store emits events through this trait after successful
/// gateway round trips.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls)
/// - Failure to emit must not affect store operations (best-effort)
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

/// Trait for reporting failed operations to the user-facing layer.
///
/// Fire-and-forget: implementations must not block and no response is
/// expected.
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str, error: &Error);
}

/// Reports errors through the `log` facade.
#[derive(Clone, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, message: &str, error: &Error) {
        error!("{}: {}", message, error);
    }
}

/// Discards every report.
#[derive(Clone, Default)]
pub struct NoOpErrorSink;

impl ErrorSink for NoOpErrorSink {
    fn report(&self, _message: &str, _error: &Error) {}
}

/// A report captured by [`MockErrorSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub error: String,
}

/// Mock sink for testing - collects reports with the error rendered as text.
#[derive(Clone, Default)]
pub struct MockErrorSink {
    reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl MockErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl ErrorSink for MockErrorSink {
    fn report(&self, message: &str, error: &Error) {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).push(ErrorReport {
            message: message.to_string(),
            error: error.to_string(),
        });
    }
}
