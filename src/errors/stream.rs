// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for ingestion, sinks and the micro-batch loop.
//!
//! Malformed payloads are not errors anywhere in this crate: they decode to
//! all-null records. Everything here is either a fatal startup failure or an
//! I/O failure that terminates the running query.

use thiserror::Error;

/// Errors raised by a message source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The bootstrap brokers could not be reached at startup.
    #[error("Failed to connect to brokers {brokers}: {message}")]
    Connection { brokers: String, message: String },

    /// The configured topic does not exist on the cluster.
    #[error("Topic '{topic}' does not exist")]
    UnknownTopic { topic: String },

    /// A message could not be pulled from the subscription.
    #[error("Failed to consume from topic {topic}: {message}")]
    Consume { topic: String, message: String },

    /// Underlying client error.
    #[error("Kafka client error: {0}")]
    Client(#[from] rdkafka::error::KafkaError),
}

/// Errors raised by a row sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write batch {batch_id}: {source}")]
    Io {
        batch_id: u64,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that terminate a running streaming query.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
