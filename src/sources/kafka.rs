// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Kafka ingestion.
//!
//! Offsets are never committed back to the cluster. Together with a per-run
//! consumer group this means every run replays the topic from
//! `starting_offsets`, so a message can be seen more than once across runs
//! (at-least-once). Nothing here deduplicates.

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::BorrowedMessage;
use rdkafka::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::SourceConfig;
use crate::errors::SourceError;
use crate::observability::messages::source::{SourceClosed, SourceConnected, SourceConnectionFailed};
use crate::observability::messages::StructuredLog;
use crate::sources::SourceMessage;
use crate::traits::MessageSource;

pub struct KafkaSource {
    consumer: Arc<StreamConsumer>,
    topic: String,
    poll_timeout: Duration,
    consumed: u64,
}

impl KafkaSource {
    /// Client properties for a subscription described by `config`.
    pub fn client_config(config: &SourceConfig, app_name: &str) -> ClientConfig {
        let mut client_config = ClientConfig::new();

        client_config
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("group.id", config.effective_group_id(app_name))
            .set("client.id", app_name)
            .set("auto.offset.reset", config.starting_offsets.as_auto_offset_reset())
            .set("enable.auto.commit", "false");

        for (key, value) in &config.properties {
            client_config.set(key, value);
        }

        client_config
    }

    /// Create the consumer, verify the broker and topic, and subscribe.
    ///
    /// Any failure here is returned as-is; there is no retry.
    pub async fn connect(config: &SourceConfig, app_name: &str) -> Result<Self, SourceError> {
        let result = Self::try_connect(config, app_name).await;
        if let Err(error) = &result {
            SourceConnectionFailed {
                brokers: &config.bootstrap_servers,
                topic: &config.topic,
                error,
            }
            .log();
        }
        result
    }

    async fn try_connect(config: &SourceConfig, app_name: &str) -> Result<Self, SourceError> {
        let consumer: StreamConsumer = Self::client_config(config, app_name)
            .create()
            .map_err(|e| SourceError::Connection {
                brokers: config.bootstrap_servers.clone(),
                message: e.to_string(),
            })?;
        let consumer = Arc::new(consumer);

        let partitions = Self::topic_partitions(&consumer, config).await?;

        consumer.subscribe(&[config.topic.as_str()])?;

        SourceConnected {
            brokers: &config.bootstrap_servers,
            topic: &config.topic,
            partitions,
            starting_offsets: config.starting_offsets.as_auto_offset_reset(),
        }
        .log();

        Ok(Self {
            consumer,
            topic: config.topic.clone(),
            poll_timeout: config.poll_timeout(),
            consumed: 0,
        })
    }

    /// Partition count of the configured topic, fetched from the cluster.
    async fn topic_partitions(
        consumer: &Arc<StreamConsumer>,
        config: &SourceConfig,
    ) -> Result<usize, SourceError> {
        let connection_error = |message: String| SourceError::Connection {
            brokers: config.bootstrap_servers.clone(),
            message,
        };

        // fetch_metadata blocks the calling thread
        let consumer = Arc::clone(consumer);
        let topic = config.topic.clone();
        let metadata_timeout = config.metadata_timeout();
        let partitions = tokio::task::spawn_blocking(move || {
            let metadata = consumer.fetch_metadata(Some(topic.as_str()), metadata_timeout)?;
            Ok::<_, KafkaError>(
                metadata
                    .topics()
                    .iter()
                    .find(|t| t.name() == topic)
                    .filter(|t| t.error().is_none() && !t.partitions().is_empty())
                    .map(|t| t.partitions().len()),
            )
        })
        .await
        .map_err(|e| connection_error(e.to_string()))?
        .map_err(|e| connection_error(e.to_string()))?;

        partitions.ok_or_else(|| SourceError::UnknownTopic {
            topic: config.topic.clone(),
        })
    }

    fn consume_error(&self, error: KafkaError) -> SourceError {
        SourceError::Consume {
            topic: self.topic.clone(),
            message: error.to_string(),
        }
    }

    fn to_source_message(message: &BorrowedMessage<'_>) -> SourceMessage {
        SourceMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message.key().map(<[u8]>::to_vec),
            value: message.payload().map(<[u8]>::to_vec),
            timestamp: message.timestamp().to_millis(),
        }
    }
}

#[async_trait]
impl MessageSource for KafkaSource {
    fn name(&self) -> &str {
        &self.topic
    }

    async fn next_batch(
        &mut self,
        max_records: usize,
        max_wait: Duration,
    ) -> Result<Vec<SourceMessage>, SourceError> {
        let mut batch = Vec::new();

        match timeout(max_wait, self.consumer.recv()).await {
            Err(_) | Ok(Err(KafkaError::PartitionEOF(_))) => return Ok(batch),
            Ok(Err(e)) => return Err(self.consume_error(e)),
            Ok(Ok(message)) => batch.push(Self::to_source_message(&message)),
        }

        while batch.len() < max_records {
            match timeout(self.poll_timeout, self.consumer.recv()).await {
                Err(_) | Ok(Err(KafkaError::PartitionEOF(_))) => break,
                Ok(Err(e)) => return Err(self.consume_error(e)),
                Ok(Ok(message)) => batch.push(Self::to_source_message(&message)),
            }
        }

        self.consumed += batch.len() as u64;
        Ok(batch)
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        self.consumer.unsubscribe();
        SourceClosed {
            topic: &self.topic,
            consumed: self.consumed,
        }
        .log();
        Ok(())
    }
}
