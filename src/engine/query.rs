// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Micro-batch query loop.
//!
//! ```text
//! loop:
//!   next_batch(max_records, max_wait)  -- empty: skip, batch id unchanged
//!   rows = filter_map(transform)       -- arrival order kept
//!   sink.write_batch(batch_id, rows)   -- written even when rows is empty
//!   batch_id += 1
//!   wait out the rest of the interval
//! ```
//!
//! Offsets are never committed, so a restart replays from the configured
//! starting offsets and rows may repeat across runs.

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::StreamError;
use crate::engine::Trigger;
use crate::observability::messages::query::{BatchCompleted, BatchStarted, QueryTerminated};
use crate::observability::messages::StructuredLog;
use crate::records::Row;
use crate::sources::SourceMessage;
use crate::traits::{MessageSource, RowSink, StreamingJob};

/// Running totals for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryProgress {
    /// Batches written to the sink
    pub batches: u64,
    pub input_rows: u64,
    pub output_rows: u64,
}

/// Map every message through `job`, keeping arrival order and dropping the
/// messages it filters.
pub fn process_batch(job: &dyn StreamingJob, messages: &[SourceMessage]) -> Vec<Row> {
    messages.iter().filter_map(|m| job.transform(m)).collect()
}

pub struct StreamingQuery<S: MessageSource, K: RowSink> {
    job: Arc<dyn StreamingJob>,
    source: S,
    sink: K,
    trigger: Trigger,
    next_batch_id: u64,
    progress: QueryProgress,
}

impl<S: MessageSource, K: RowSink> StreamingQuery<S, K> {
    pub fn new(job: Arc<dyn StreamingJob>, source: S, sink: K, trigger: Trigger) -> Self {
        Self {
            job,
            source,
            sink,
            trigger,
            next_batch_id: 0,
            progress: QueryProgress::default(),
        }
    }

    /// Id the next written batch will carry.
    pub fn next_batch_id(&self) -> u64 {
        self.next_batch_id
    }

    pub fn progress(&self) -> QueryProgress {
        self.progress
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Pull and write one micro-batch.
    ///
    /// Returns the id of the written batch, or `None` when the source had
    /// nothing to offer within `max_wait`.
    pub async fn run_batch(&mut self) -> Result<Option<u64>, StreamError> {
        let messages = self
            .source
            .next_batch(self.trigger.max_records_per_batch, self.trigger.max_wait)
            .await?;
        if messages.is_empty() {
            return Ok(None);
        }

        let started = Instant::now();
        let batch_id = self.next_batch_id;

        // No await below this point, so the guard never crosses a suspension
        let start_msg = BatchStarted {
            job: self.job.name(),
            batch_id,
            input_rows: messages.len(),
        };
        let span = start_msg.span("micro_batch");
        let _guard = span.enter();
        start_msg.log();

        let rows = process_batch(self.job.as_ref(), &messages);

        self.sink.write_batch(batch_id, self.job.columns(), &rows)?;

        self.next_batch_id += 1;
        self.progress.batches += 1;
        self.progress.input_rows += messages.len() as u64;
        self.progress.output_rows += rows.len() as u64;

        BatchCompleted {
            job: self.job.name(),
            batch_id,
            input_rows: messages.len(),
            output_rows: rows.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(Some(batch_id))
    }

    /// Run batches until `shutdown` is cancelled or a batch fails.
    ///
    /// Shutdown can interrupt a batch anywhere inside the source's
    /// `next_batch`, including after some messages have been received;
    /// those messages are discarded unwritten and, since offsets are never
    /// committed, are read again by the next run. Once `next_batch` returns,
    /// the batch is written before shutdown is honoured. The source is closed
    /// on every exit path.
    pub async fn await_termination(
        &mut self,
        shutdown: CancellationToken,
    ) -> Result<QueryProgress, StreamError> {
        let outcome = self.run_until_cancelled(&shutdown).await;
        let closed = self.source.close().await;

        QueryTerminated {
            job: self.job.name(),
            batches: self.progress.batches,
            output_rows: self.progress.output_rows,
            reason: if outcome.is_ok() { "shutdown" } else { "error" },
        }
        .log();

        outcome?;
        closed?;
        Ok(self.progress)
    }

    async fn run_until_cancelled(&mut self, shutdown: &CancellationToken) -> Result<(), StreamError> {
        loop {
            let started = Instant::now();

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return Ok(()),
                result = self.run_batch() => { result?; }
            }

            let remaining = self.trigger.interval.saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(remaining) => {}
                }
            }
        }
    }
}
