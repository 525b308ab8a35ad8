use std::time::Duration;

use crate::config::TriggerConfig;

/// When micro-batches run and how large they get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// Minimum time between batch starts; zero runs the next batch as soon as
    /// the previous one is written.
    pub interval: Duration,
    pub max_records_per_batch: usize,
    /// How long a batch waits for its first message.
    pub max_wait: Duration,
}

impl Trigger {
    pub fn from_config(config: &TriggerConfig) -> Self {
        Self {
            interval: config.get_interval(),
            max_records_per_batch: config.get_max_records_per_batch(),
            max_wait: config.get_max_wait(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::from_config(&TriggerConfig::default())
    }
}
