// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic line the pipeline emits is a message struct with a
//! `Display` implementation, so there are no magic strings scattered through
//! the sources, jobs, and engine. Messages are grouped by subsystem:
//!
//! * `messages::session` - session start and stop
//! * `messages::source` - broker connection and subscription lifecycle
//! * `messages::query` - micro-batch progress and dropped records
//! * `messages::validation` - configuration warnings
//!
//! Logs go to stderr so they never interleave with the batch tables the
//! console sink writes to stdout.
//!
//! # Usage
//!
//! ```rust
//! use stedi_streams::observability::messages::query::BatchCompleted;
//! use std::time::Duration;
//!
//! let msg = BatchCompleted {
//!     job: "customer_risk",
//!     batch_id: 0,
//!     input_rows: 3,
//!     output_rows: 3,
//!     duration: Duration::from_millis(12),
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` is used as the filter.
/// Calling this twice is harmless: the second install is ignored.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
