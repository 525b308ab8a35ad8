// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

use crate::errors::SourceError;
use crate::sources::SourceMessage;
use crate::traits::MessageSource;

/// Source that replays batches held in memory.
///
/// Each queued batch is handed out as-is, split if it exceeds `max_records`.
/// Once drained it behaves like an idle topic: every call waits `max_wait`
/// and returns an empty batch.
#[derive(Debug, Default)]
pub struct MemorySource {
    name: String,
    batches: VecDeque<Vec<SourceMessage>>,
}

impl MemorySource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            batches: VecDeque::new(),
        }
    }

    /// Queue a batch, builder style
    pub fn with_batch(mut self, batch: Vec<SourceMessage>) -> Self {
        self.push_batch(batch);
        self
    }

    pub fn push_batch(&mut self, batch: Vec<SourceMessage>) {
        self.batches.push_back(batch);
    }

    /// Messages not yet handed out
    pub fn remaining(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }
}

#[async_trait]
impl MessageSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_batch(
        &mut self,
        max_records: usize,
        max_wait: Duration,
    ) -> Result<Vec<SourceMessage>, SourceError> {
        match self.batches.pop_front() {
            Some(mut batch) => {
                if batch.len() > max_records {
                    let rest = batch.split_off(max_records);
                    self.batches.push_front(rest);
                }
                Ok(batch)
            }
            None => {
                tokio::time::sleep(max_wait).await;
                Ok(Vec::new())
            }
        }
    }
}
