// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for Kafka source events.
//!
//! This module contains message types for logging events related to:
//! * Broker connection and topic subscription
//! * Connection failures at startup
//! * Source shutdown

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Consumer created and subscribed to its topic.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::source::SourceConnected;
///
/// let msg = SourceConnected {
///     brokers: "localhost:9092",
///     topic: "stedi-events",
///     partitions: 1,
///     starting_offsets: "earliest",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SourceConnected<'a> {
    pub brokers: &'a str,
    pub topic: &'a str,
    pub partitions: usize,
    pub starting_offsets: &'a str,
}

impl Display for SourceConnected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Subscribed to topic '{}' on {}: partitions={}, starting_offsets={}",
            self.topic, self.brokers, self.partitions, self.starting_offsets
        )
    }
}

impl StructuredLog for SourceConnected<'_> {
    fn log(&self) {
        tracing::info!(
            brokers = self.brokers,
            topic = self.topic,
            partitions = self.partitions,
            starting_offsets = self.starting_offsets,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "source",
            span_name = name,
            brokers = self.brokers,
            topic = self.topic,
            partitions = self.partitions,
        )
    }
}

/// Broker unreachable or topic missing at startup.
///
/// # Log Level
/// `error!` - Fatal to the run
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::source::SourceConnectionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
/// let msg = SourceConnectionFailed {
///     brokers: "localhost:9092",
///     topic: "redis-server",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct SourceConnectionFailed<'a> {
    pub brokers: &'a str,
    pub topic: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SourceConnectionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to subscribe to topic '{}' on {}: {}",
            self.topic, self.brokers, self.error
        )
    }
}

impl StructuredLog for SourceConnectionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            brokers = self.brokers,
            topic = self.topic,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "source_connection_failed",
            span_name = name,
            brokers = self.brokers,
            topic = self.topic,
            error = %self.error,
        )
    }
}

/// Source unsubscribed at the end of a query.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SourceClosed<'a> {
    pub topic: &'a str,
    pub consumed: u64,
}

impl Display for SourceClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Closed source for topic '{}': consumed={} messages",
            self.topic, self.consumed
        )
    }
}

impl StructuredLog for SourceClosed<'_> {
    fn log(&self) {
        tracing::info!(topic = self.topic, consumed = self.consumed, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "source_closed",
            span_name = name,
            topic = self.topic,
            consumed = self.consumed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_includes_error() {
        let error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let msg = SourceConnectionFailed {
            brokers: "localhost:9092",
            topic: "stedi-events",
            error: &error,
        };
        assert_eq!(
            msg.to_string(),
            "Failed to subscribe to topic 'stedi-events' on localhost:9092: refused"
        );
    }
}
