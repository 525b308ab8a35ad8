// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::engine::{StreamingQuery, Trigger};
use crate::observability::messages::session::{SessionStarted, SessionStopped};
use crate::observability::messages::StructuredLog;
use crate::traits::{MessageSource, RowSink, StreamingJob};

/// Execution context for one run of the pipeline.
///
/// Created at process start and stopped on termination. The session hands out
/// its shutdown token so a signal handler can end the running query; nothing
/// about the session lives in global state.
///
/// # Examples
///
/// ```
/// use stedi_streams::engine::{StreamingSession, Trigger};
/// use stedi_streams::jobs::CustomerRiskJob;
/// use stedi_streams::sinks::{ConsoleOptions, ConsoleSink};
/// use stedi_streams::sources::MemorySource;
/// use std::sync::Arc;
///
/// let session = StreamingSession::new("kafka-stedi-events");
/// let query = session.start(
///     MemorySource::new("stedi-events"),
///     Arc::new(CustomerRiskJob::new()),
///     ConsoleSink::new(Vec::new(), ConsoleOptions::default()),
///     Trigger::default(),
/// );
/// assert_eq!(query.next_batch_id(), 0);
/// session.stop();
/// ```
pub struct StreamingSession {
    app_name: String,
    shutdown: CancellationToken,
    started_at: Instant,
}

impl StreamingSession {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            shutdown: CancellationToken::new(),
            started_at: Instant::now(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Token that ends every query started from this session once cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Assemble a query over `source`, `job` and `sink`. Nothing runs until
    /// the query is awaited.
    pub fn start<S, K>(
        &self,
        source: S,
        job: Arc<dyn StreamingJob>,
        sink: K,
        trigger: Trigger,
    ) -> StreamingQuery<S, K>
    where
        S: MessageSource,
        K: RowSink,
    {
        SessionStarted {
            app_name: &self.app_name,
            job: job.name(),
        }
        .log();
        StreamingQuery::new(job, source, sink, trigger)
    }

    /// Signal shutdown and release the session.
    pub fn stop(self) {
        self.shutdown.cancel();
        SessionStopped {
            app_name: &self.app_name,
            uptime: self.started_at.elapsed(),
        }
        .log();
    }
}
