//! Configuration validation for job configs.
//!
//! Validation collects every problem instead of stopping at the first, so a
//! broken file is fixed in one pass:
//!
//! 1. **Required text**: `app_name`, `source.bootstrap_servers`, `source.topic`
//! 2. **Output mode**: `complete` needs an aggregation, which neither job has
//! 3. **Positive limits**: `sink.num_rows`, `trigger.max_records_per_batch`
//!
//! A topic that differs from the job's usual topic is allowed but logged,
//! since replaying a job against a copy of its topic is a normal thing to do.
//!
//! # Examples
//!
//! ```rust
//! use stedi_streams::config::{validate_config, Config};
//!
//! let config: Config = serde_yaml::from_str(r#"
//! app_name: kafka-stedi-events
//! job: customer_risk
//! source:
//!   topic: stedi-events
//! "#).unwrap();
//!
//! assert!(validate_config(&config).is_ok());
//! ```

use crate::config::{Config, OutputMode};
use crate::errors::ValidationError;
use crate::observability::messages::validation::UnconventionalTopic;
use crate::observability::messages::StructuredLog;

/// Validate a loaded configuration, returning every error found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("app_name", config.app_name.as_str()),
        ("source.bootstrap_servers", config.source.bootstrap_servers.as_str()),
        ("source.topic", config.source.topic.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    if config.sink.output_mode == OutputMode::Complete {
        errors.push(ValidationError::UnsupportedOutputMode {
            mode: config.sink.output_mode.as_str().to_string(),
        });
    }

    if config.sink.get_num_rows() == 0 {
        errors.push(ValidationError::NonPositive { field: "sink.num_rows" });
    }
    if config.trigger.get_max_records_per_batch() == 0 {
        errors.push(ValidationError::NonPositive {
            field: "trigger.max_records_per_batch",
        });
    }

    let expected = config.job.conventional_topic();
    if !config.source.topic.is_empty() && config.source.topic != expected {
        UnconventionalTopic {
            job: config.job.as_str(),
            topic: &config.source.topic,
            expected,
        }
        .log();
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        let config = parse(
            r#"
app_name: kafka-redis-stream
job: customer_birth_year
source:
  topic: redis-server
"#,
        );

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_fields_all_reported() {
        let config = parse(
            r#"
app_name: ""
job: customer_risk
source:
  bootstrap_servers: "  "
  topic: ""
"#,
        );

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyField { field: "app_name" }));
        assert!(errors.contains(&ValidationError::EmptyField {
            field: "source.bootstrap_servers"
        }));
        assert!(errors.contains(&ValidationError::EmptyField { field: "source.topic" }));
    }

    #[test]
    fn test_complete_output_mode_rejected() {
        let config = parse(
            r#"
app_name: kafka-stedi-events
job: customer_risk
source:
  topic: stedi-events
sink:
  output_mode: complete
"#,
        );

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnsupportedOutputMode {
                mode: "complete".to_string()
            }]
        );
    }

    #[test]
    fn test_update_output_mode_accepted() {
        let config = parse(
            r#"
app_name: kafka-stedi-events
job: customer_risk
source:
  topic: stedi-events
sink:
  output_mode: update
"#,
        );

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = parse(
            r#"
app_name: kafka-stedi-events
job: customer_risk
source:
  topic: stedi-events
trigger:
  max_records_per_batch: 0
sink:
  num_rows: 0
"#,
        );

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NonPositive { field: "sink.num_rows" }));
        assert!(errors.contains(&ValidationError::NonPositive {
            field: "trigger.max_records_per_batch"
        }));
    }

    #[test]
    fn test_unconventional_topic_is_only_a_warning() {
        let config = parse(
            r#"
app_name: replay
job: customer_risk
source:
  topic: stedi-events-replay
"#,
        );

        assert!(validate_config(&config).is_ok());
    }
}
