// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for streaming query progress.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Micro-batch pulled from the source and about to be transformed.
///
/// # Log Level
/// `debug!` - Per-batch detail
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::query::BatchStarted;
/// use stedi_streams::observability::messages::StructuredLog;
///
/// let msg = BatchStarted {
///     job: "customer_risk",
///     batch_id: 0,
///     input_rows: 12,
/// };
///
/// let span = msg.span("micro_batch");
/// let _guard = span.enter();
/// tracing::debug!("{}", msg);
/// ```
pub struct BatchStarted<'a> {
    pub job: &'a str,
    pub batch_id: u64,
    pub input_rows: usize,
}

impl Display for BatchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch {} of '{}' started: input_rows={}",
            self.batch_id, self.job, self.input_rows
        )
    }
}

impl StructuredLog for BatchStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            job = self.job,
            batch_id = self.batch_id,
            input_rows = self.input_rows,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch",
            span_name = name,
            job = self.job,
            batch_id = self.batch_id,
            input_rows = self.input_rows,
        )
    }
}

/// One micro-batch written to the sink.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stedi_streams::observability::messages::query::BatchCompleted;
/// use std::time::Duration;
///
/// let msg = BatchCompleted {
///     job: "customer_birth_year",
///     batch_id: 4,
///     input_rows: 10,
///     output_rows: 7,
///     duration: Duration::from_millis(3),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BatchCompleted<'a> {
    pub job: &'a str,
    pub batch_id: u64,
    pub input_rows: usize,
    pub output_rows: usize,
    pub duration: Duration,
}

impl Display for BatchCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch {} of '{}' completed in {:?}: input_rows={}, output_rows={}",
            self.batch_id, self.job, self.duration, self.input_rows, self.output_rows
        )
    }
}

impl StructuredLog for BatchCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            job = self.job,
            batch_id = self.batch_id,
            input_rows = self.input_rows,
            output_rows = self.output_rows,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch",
            span_name = name,
            job = self.job,
            batch_id = self.batch_id,
        )
    }
}

/// Record filtered out by a job.
///
/// # Log Level
/// `debug!` - Per-record detail
pub struct RecordDropped<'a> {
    pub job: &'a str,
    pub topic: &'a str,
    pub partition: i32,
    pub offset: i64,
    pub reason: &'a str,
}

impl Display for RecordDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropped record {}/{}@{} in '{}': {}",
            self.topic, self.partition, self.offset, self.job, self.reason
        )
    }
}

impl StructuredLog for RecordDropped<'_> {
    fn log(&self) {
        tracing::debug!(
            job = self.job,
            topic = self.topic,
            partition = self.partition,
            offset = self.offset,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "record_dropped",
            span_name = name,
            job = self.job,
            offset = self.offset,
        )
    }
}

/// Query loop exited.
///
/// # Log Level
/// `info!` - Important operational event
pub struct QueryTerminated<'a> {
    pub job: &'a str,
    pub batches: u64,
    pub output_rows: u64,
    pub reason: &'a str,
}

impl Display for QueryTerminated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Query '{}' terminated ({}): batches={}, output_rows={}",
            self.job, self.reason, self.batches, self.output_rows
        )
    }
}

impl StructuredLog for QueryTerminated<'_> {
    fn log(&self) {
        tracing::info!(
            job = self.job,
            batches = self.batches,
            output_rows = self.output_rows,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "query_terminated",
            span_name = name,
            job = self.job,
            reason = self.reason,
        )
    }
}
