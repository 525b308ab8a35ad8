use async_trait::async_trait;
use std::time::Duration;

use crate::errors::SourceError;
use crate::sources::SourceMessage;

#[async_trait]
pub trait MessageSource: Send {
    /// Human readable identity, usually the topic.
    fn name(&self) -> &str;

    /// Pull the next micro-batch.
    ///
    /// Waits up to `max_wait` for a first message and returns an empty batch
    /// if none arrives. Never returns more than `max_records` messages.
    async fn next_batch(
        &mut self,
        max_records: usize,
        max_wait: Duration,
    ) -> Result<Vec<SourceMessage>, SourceError>;

    /// Release the subscription.
    async fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}
