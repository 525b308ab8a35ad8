// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::engine::Trigger;
use crate::jobs::JobFactory;
use crate::sinks::ConsoleOptions;
use crate::traits::StreamingJob;

/// Job runtime builder - turns a configuration into the parts of a streaming query.
///
/// Everything that can be built without touching the network is built here.
/// The source is connected separately, since an unreachable broker is a
/// fatal startup error the caller has to report.
///
/// # Examples
///
/// ```
/// use stedi_streams::config::{Config, RuntimeBuilder};
///
/// let config: Config = serde_yaml::from_str(r#"
/// app_name: kafka-redis-stream
/// job: customer_birth_year
/// source:
///   topic: redis-server
/// "#).unwrap();
///
/// let (job, trigger, console) = RuntimeBuilder::from_config(&config);
/// assert_eq!(job.name(), "customer_birth_year");
/// assert_eq!(job.columns(), &["email", "birthYear"]);
/// assert_eq!(trigger.max_records_per_batch, 1_000);
/// assert_eq!(console.num_rows, 20);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the job, trigger and console options described by `cfg`.
    pub fn from_config(cfg: &Config) -> (Arc<dyn StreamingJob>, Trigger, ConsoleOptions) {
        let job = JobFactory::create(cfg.job);
        let trigger = Trigger::from_config(&cfg.trigger);
        let console = ConsoleOptions::from_config(&cfg.sink);
        (job, trigger, console)
    }
}
