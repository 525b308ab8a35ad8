// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Micro-batch streaming engine.
//!
//! A [`StreamingSession`] owns the shutdown signal for the process and starts
//! a [`StreamingQuery`], which repeatedly pulls a batch from its source, maps
//! each message through the job and writes the surviving rows to its sink.

pub mod query;
pub mod session;
pub mod trigger;
#[cfg(test)]
mod integration_tests;

pub use query::{process_batch, QueryProgress, StreamingQuery};
pub use session::StreamingSession;
pub use trigger::Trigger;
