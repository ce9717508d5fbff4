#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in apack
//!
//! All user-visible output from library crates goes through events - the
//! CLI is the only place that prints. Library code sends events on an
//! unbounded channel and never blocks on the consumer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Events emitted by the build pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Download events
    DownloadStarted {
        url: String,
        size: Option<u64>,
    },
    DownloadProgress {
        url: String,
        bytes_downloaded: u64,
        total_bytes: u64,
    },
    DownloadCompleted {
        url: String,
        size: u64,
    },

    // Environment events
    VenvCreating {
        path: PathBuf,
    },
    VenvCreated {
        path: PathBuf,
    },
    VenvRemoved {
        path: PathBuf,
    },
    ModuleInstalling {
        name: String,
    },
    ModuleInstalled {
        name: String,
    },
    PluginInstalling {
        name: String,
        source: PathBuf,
    },
    PluginInstalled {
        name: String,
    },

    // Archive events
    ArchiveExtracting {
        archive: PathBuf,
        dest: PathBuf,
    },
    ArchiveCreating {
        source: PathBuf,
        dest: PathBuf,
    },
    ArchiveCreated {
        dest: PathBuf,
        size: u64,
    },

    // Pipeline events
    OperationStarted {
        operation: String,
    },
    OperationCompleted {
        operation: String,
        success: bool,
    },
    Warning {
        message: String,
    },
    DebugLog {
        message: String,
    },
}

/// Type alias for event sender
pub type EventSender = UnboundedSender<Event>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<Event>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the apack system
///
/// Implemented by any struct that carries an `EventSender`, so pipeline
/// code can emit without caring where the sender lives.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: Event) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if the receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(Event::DebugLog {
            message: message.into(),
        });
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(Event::Warning {
            message: message.into(),
        });
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(Event::OperationStarted {
            operation: operation.into(),
        });
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(Event::OperationCompleted {
            operation: operation.into(),
            success,
        });
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_delivery() {
        let (tx, mut rx) = channel();
        tx.emit_operation_started("create");
        tx.emit(Event::VenvCreated {
            path: PathBuf::from("/tmp/env"),
        });

        assert!(matches!(
            rx.recv().await,
            Some(Event::OperationStarted { operation }) if operation == "create"
        ));
        assert!(matches!(rx.recv().await, Some(Event::VenvCreated { .. })));
    }

    #[tokio::test]
    async fn test_emit_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        // Must not panic or error
        tx.emit_warning("receiver gone");
    }
}
