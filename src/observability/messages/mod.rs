// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with its fields attached at the right level.
//!
//! # Organization
//!
//! * `session` - streaming session lifecycle
//! * `source` - Kafka connection and subscription events
//! * `query` - micro-batch progress, dropped records, termination
//! * `validation` - configuration warnings
//!
//! # Usage Pattern
//!
//! ```rust
//! use stedi_streams::observability::messages::session::SessionStarted;
//! use stedi_streams::observability::messages::StructuredLog;
//!
//! let msg = SessionStarted {
//!     app_name: "kafka-stedi-events",
//!     job: "customer_risk",
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod query;
pub mod session;
pub mod source;
pub mod validation;

/// Emit a message as a structured tracing event or span.
pub trait StructuredLog {
    /// Log at the level the message documents, with its fields attached.
    fn log(&self);

    /// Span carrying the same fields, for scoping work under this event.
    fn span(&self, name: &str) -> Span;
}
