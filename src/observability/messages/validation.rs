// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation warnings.
//!
//! Hard validation failures are returned as `ValidationError`s; the messages
//! here cover configurations that load fine but look unintended.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Job subscribed to a topic other than the one it normally reads.
///
/// # Log Level
/// `warn!` - Potential issue that doesn't prevent the run
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::validation::UnconventionalTopic;
///
/// let msg = UnconventionalTopic {
///     job: "customer_risk",
///     topic: "risk-replay",
///     expected: "stedi-events",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct UnconventionalTopic<'a> {
    pub job: &'a str,
    pub topic: &'a str,
    pub expected: &'a str,
}

impl Display for UnconventionalTopic<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Job '{}' reads topic '{}' instead of '{}'",
            self.job, self.topic, self.expected
        )
    }
}

impl StructuredLog for UnconventionalTopic<'_> {
    fn log(&self) {
        tracing::warn!(
            job = self.job,
            topic = self.topic,
            expected = self.expected,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unconventional_topic",
            span_name = name,
            job = self.job,
            topic = self.topic,
        )
    }
}
