// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ingestion backends for streaming queries.
//!
//! ## Kafka
//! Subscribes to one topic through an rdkafka `StreamConsumer`, starting from
//! the configured offset. Broker and topic are checked once at startup and a
//! failure there is fatal.
//!
//! ## Memory
//! Replays pre-built batches. Used by tests and for running a job against
//! captured payloads.

pub mod kafka;
pub mod memory;
mod message;

pub use kafka::KafkaSource;
pub use memory::MemorySource;
pub use message::SourceMessage;
