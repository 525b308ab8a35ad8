// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for streaming session lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Streaming session created and about to start its query.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::session::SessionStarted;
///
/// let msg = SessionStarted {
///     app_name: "kafka-redis-stream",
///     job: "customer_birth_year",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SessionStarted<'a> {
    pub app_name: &'a str,
    pub job: &'a str,
}

impl Display for SessionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Streaming session '{}' started: job={}",
            self.app_name, self.job
        )
    }
}

impl StructuredLog for SessionStarted<'_> {
    fn log(&self) {
        tracing::info!(app_name = self.app_name, job = self.job, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "session",
            span_name = name,
            app_name = self.app_name,
            job = self.job,
        )
    }
}

/// Streaming session stopped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SessionStopped<'a> {
    pub app_name: &'a str,
    pub uptime: Duration,
}

impl Display for SessionStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Streaming session '{}' stopped after {:.3}s",
            self.app_name,
            self.uptime.as_secs_f64()
        )
    }
}

impl StructuredLog for SessionStopped<'_> {
    fn log(&self) {
        tracing::info!(
            app_name = self.app_name,
            uptime_ms = self.uptime.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "session_stopped",
            span_name = name,
            app_name = self.app_name,
            uptime_ms = self.uptime.as_millis() as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_messages_display() {
        let started = SessionStarted {
            app_name: "kafka-stedi-events",
            job: "customer_risk",
        };
        assert_eq!(
            started.to_string(),
            "Streaming session 'kafka-stedi-events' started: job=customer_risk"
        );

        let stopped = SessionStopped {
            app_name: "kafka-stedi-events",
            uptime: Duration::from_millis(1500),
        };
        assert_eq!(
            stopped.to_string(),
            "Streaming session 'kafka-stedi-events' stopped after 1.500s"
        );
    }
}
