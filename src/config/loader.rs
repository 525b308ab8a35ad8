// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_BOOTSTRAP_SERVERS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_RECORDS_PER_BATCH,
    DEFAULT_MAX_WAIT_MS, DEFAULT_METADATA_TIMEOUT_MS, DEFAULT_NUM_ROWS, DEFAULT_POLL_TIMEOUT_MS,
    REDIS_SERVER_TOPIC, STEDI_EVENTS_TOPIC, TRUNCATE_WIDTH,
};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Main configuration structure for one streaming job.
///
/// One process runs exactly one job, so a configuration file names the job
/// together with where it reads from and how it prints.
///
/// # Fields
/// * `app_name` - Name used for logging and the default consumer group
/// * `job` - Which pipeline to run
/// * `log_level` - Default log filter, overridden by `RUST_LOG` (optional, defaults to `warn`)
/// * `source` - Message bus subscription
/// * `trigger` - Micro-batch scheduling options (optional)
/// * `sink` - Console sink options (optional)
///
/// # Example
/// ```yaml
/// app_name: kafka-stedi-events
/// job: customer_risk
/// source:
///   bootstrap_servers: localhost:9092
///   topic: stedi-events
///   starting_offsets: earliest
/// sink:
///   output_mode: append
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    pub app_name: String,
    pub job: JobKind,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub source: SourceConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// The streaming jobs this crate knows how to run.
///
/// # Variants
/// * `CustomerRisk` - Projects customer and score out of `stedi-events`
/// * `CustomerBirthYear` - Decodes customers out of `redis-server` and derives their birth year
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    CustomerRisk,
    CustomerBirthYear,
}

impl JobKind {
    pub const ALL: [JobKind; 2] = [JobKind::CustomerRisk, JobKind::CustomerBirthYear];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::CustomerRisk => "customer_risk",
            JobKind::CustomerBirthYear => "customer_birth_year",
        }
    }

    /// Topic the job was written against.
    pub fn conventional_topic(&self) -> &'static str {
        match self {
            JobKind::CustomerRisk => STEDI_EVENTS_TOPIC,
            JobKind::CustomerBirthYear => REDIS_SERVER_TOPIC,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message bus subscription settings.
///
/// # Fields
/// * `bootstrap_servers` - Comma separated broker list (optional, defaults to `localhost:9092`)
/// * `topic` - Topic to subscribe to
/// * `starting_offsets` - Where a fresh subscription starts (optional, defaults to `earliest`)
/// * `group_id` - Consumer group (optional, defaults to a per-run group)
/// * `poll_timeout_ms` - Wait for each follow-up message while draining a batch (optional)
/// * `metadata_timeout_ms` - How long startup waits for broker metadata (optional, defaults to 10s)
/// * `properties` - Extra client properties passed through verbatim
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: String,
    pub topic: String,
    #[serde(default)]
    pub starting_offsets: StartingOffsets,
    pub group_id: Option<String>,
    pub poll_timeout_ms: Option<u64>,
    pub metadata_timeout_ms: Option<u64>,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

fn default_bootstrap_servers() -> String {
    DEFAULT_BOOTSTRAP_SERVERS.to_string()
}

impl SourceConfig {
    /// Build a subscription to `topic` with every other setting defaulted.
    pub fn for_topic(topic: &str) -> Self {
        Self {
            bootstrap_servers: default_bootstrap_servers(),
            topic: topic.to_string(),
            starting_offsets: StartingOffsets::default(),
            group_id: None,
            poll_timeout_ms: None,
            metadata_timeout_ms: None,
            properties: HashMap::new(),
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms.unwrap_or(DEFAULT_POLL_TIMEOUT_MS))
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms.unwrap_or(DEFAULT_METADATA_TIMEOUT_MS))
    }

    /// Consumer group to join.
    ///
    /// Offsets are never committed, so without an explicit group every run
    /// gets its own group and starts from `starting_offsets`.
    pub fn effective_group_id(&self, app_name: &str) -> String {
        match &self.group_id {
            Some(group_id) => group_id.clone(),
            None => {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or_default();
                format!("{}-{}-{}", app_name, std::process::id(), millis)
            }
        }
    }
}

/// Position a new subscription starts reading from.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartingOffsets {
    #[default]
    Earliest,
    Latest,
}

impl StartingOffsets {
    /// Value for the client's `auto.offset.reset` property.
    pub fn as_auto_offset_reset(&self) -> &'static str {
        match self {
            StartingOffsets::Earliest => "earliest",
            StartingOffsets::Latest => "latest",
        }
    }
}

/// Micro-batch scheduling options.
///
/// # Fields
/// * `interval_ms` - Minimum time between batch starts, 0 runs back to back (optional)
/// * `max_records_per_batch` - Cap on messages per batch (optional, defaults to 1000)
/// * `max_wait_ms` - How long a batch waits for its first message (optional, defaults to 1s)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TriggerConfig {
    pub interval_ms: Option<u64>,
    pub max_records_per_batch: Option<usize>,
    pub max_wait_ms: Option<u64>,
}

impl TriggerConfig {
    pub fn get_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.unwrap_or(0))
    }

    pub fn get_max_records_per_batch(&self) -> usize {
        self.max_records_per_batch.unwrap_or(DEFAULT_MAX_RECORDS_PER_BATCH)
    }

    pub fn get_max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms.unwrap_or(DEFAULT_MAX_WAIT_MS))
    }
}

/// Sink settings.
///
/// # Fields
/// * `format` - Sink kind, only `console` exists
/// * `output_mode` - `append` or `update`; `complete` is rejected by validation
/// * `num_rows` - Rows printed per batch (optional, defaults to 20)
/// * `truncate` - Cut long cells to 20 characters (optional, defaults to true)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SinkConfig {
    #[serde(default)]
    pub format: SinkFormat,
    #[serde(default)]
    pub output_mode: OutputMode,
    pub num_rows: Option<usize>,
    pub truncate: Option<bool>,
}

impl SinkConfig {
    pub fn get_num_rows(&self) -> usize {
        self.num_rows.unwrap_or(DEFAULT_NUM_ROWS)
    }

    /// Truncation width, `None` when truncation is off.
    pub fn get_truncate_width(&self) -> Option<usize> {
        if self.truncate.unwrap_or(true) {
            Some(TRUNCATE_WIDTH)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum SinkFormat {
    #[default]
    Console,
}

/// How result rows are emitted.
///
/// Both jobs are stateless, so `append` and `update` behave identically:
/// each row is printed once and never revised.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Append,
    Update,
    Complete,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Append => "append",
            OutputMode::Update => "update",
            OutputMode::Complete => "complete",
        }
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is reported at once rather than stopping at the first.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
