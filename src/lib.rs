// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // config + runtime builder
pub mod engine;        // session + micro-batch query loop
pub mod errors;        // error handling
pub mod jobs;          // the two streaming jobs
pub mod observability;
pub mod records;       // typed records and console rows
pub mod schema;        // permissive JSON schemas
pub mod sinks;         // console sink
pub mod sources;       // kafka + in-memory sources
pub mod traits;        // unified abstractions
