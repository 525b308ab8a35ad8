// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty
    EmptyField {
        /// Dotted path of the offending field, e.g. `source.topic`
        field: &'static str,
    },
    /// The requested output mode needs a streaming aggregation these jobs never have
    UnsupportedOutputMode {
        /// The rejected output mode
        mode: String,
    },
    /// A numeric option must be strictly positive
    NonPositive {
        /// Dotted path of the offending field
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Configuration field '{}' must not be empty", field)
            }
            ValidationError::UnsupportedOutputMode { mode } => {
                write!(
                    f,
                    "Output mode '{}' is not supported: jobs are stateless projections, use 'append'",
                    mode
                )
            }
            ValidationError::NonPositive { field } => {
                write!(f, "Configuration field '{}' must be greater than zero", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a job configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
