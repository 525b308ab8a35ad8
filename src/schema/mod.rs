// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Static schemas used to turn loosely typed message text into records.
//!
//! Each decode stage of a job declares the exact fields it expects. Parsing is
//! permissive: unknown fields are ignored, missing or mistyped fields become
//! null, and malformed JSON produces a record whose fields are all null. There
//! is no error path out of this module.
//!
//! # Usage
//!
//! ```rust
//! use stedi_streams::records::CustomerRisk;
//! use stedi_streams::schema::registry;
//!
//! let schema = registry::customer_risk();
//! let risk: CustomerRisk = schema.decode_as(Some(r#"{"customer":"a@test.com","score":"-1.4"}"#));
//! assert_eq!(risk.score.as_deref(), Some("-1.4"));
//! assert_eq!(risk.risk_date, None);
//! ```

mod data_type;
pub mod registry;

pub use data_type::{DataType, Field, Schema};
pub use registry::SchemaRegistry;
