// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Customer birth year job.
//!
//! Every write to redis is published as a change envelope. For sorted set
//! writes the first entry's element is a base64 encoded customer, which this
//! job unwraps to emit `email` and `birthYear`:
//!
//! ```text
//! envelope text -> zSetEntries[0].element -> base64 -> customer JSON
//!               -> drop if email or birthDay is null -> birthYear = birthDay up to '-'
//! ```
//!
//! Every step that cannot proceed yields null instead of failing, and the
//! null filter at the end is the only place a message is dropped.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::observability::messages::query::RecordDropped;
use crate::observability::messages::StructuredLog;
use crate::records::{Customer, EmailBirthYear, RedisSortedSet, Row};
use crate::schema::{registry, Schema};
use crate::sources::SourceMessage;
use crate::traits::StreamingJob;

/// Standard alphabet, padding optional, stray low bits tolerated
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub struct CustomerBirthYearJob {
    envelope: Schema,
    customer: Schema,
}

impl CustomerBirthYearJob {
    pub fn new() -> Self {
        Self {
            envelope: registry::redis_sorted_set(),
            customer: registry::customer(),
        }
    }

    /// Run the whole decode chain over one payload.
    pub fn derive(&self, text: Option<&str>) -> Option<EmailBirthYear> {
        let change: RedisSortedSet = self.envelope.decode_as(text);
        let customer = self.decode_customer(&change);

        let email = customer.email?;
        let birth_day = customer.birth_day?;
        Some(EmailBirthYear {
            birth_year: birth_year(&birth_day).to_string(),
            email,
        })
    }

    /// Inner customer of a change; all fields null when there is none.
    pub fn decode_customer(&self, change: &RedisSortedSet) -> Customer {
        let customer_json = change.encoded_customer().and_then(decode_base64_text);
        self.customer.decode_as(customer_json.as_deref())
    }
}

impl Default for CustomerBirthYearJob {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingJob for CustomerBirthYearJob {
    fn name(&self) -> &'static str {
        "customer_birth_year"
    }

    fn columns(&self) -> &'static [&'static str] {
        EmailBirthYear::COLUMNS
    }

    fn transform(&self, message: &SourceMessage) -> Option<Row> {
        let text = message.value_text();
        match self.derive(text.as_deref()) {
            Some(row) => Some(row.into()),
            None => {
                RecordDropped {
                    job: self.name(),
                    topic: &message.topic,
                    partition: message.partition,
                    offset: message.offset,
                    reason: "email or birthDay is null",
                }
                .log();
                None
            }
        }
    }
}

/// Base64 text to UTF-8 text. Whitespace is ignored; invalid input is `None`.
pub fn decode_base64_text(encoded: &str) -> Option<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_BASE64.decode(compact).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Segment of `birth_day` before the first `-`, or all of it when there is none.
pub fn birth_year(birth_day: &str) -> &str {
    birth_day.split('-').next().unwrap_or(birth_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    const SAM_TEST: &str = r#"{"customerName":"Sam Test","email":"sam.test@test.com","phone":"8015551212","birthDay":"2001-01-03"}"#;

    fn envelope_with_elements<S: AsRef<str>>(elements: &[S]) -> String {
        let entries: Vec<_> = elements
            .iter()
            .map(|element| json!({"element": element.as_ref(), "Score": 0.0}))
            .collect();
        json!({
            "key": "Q3VzdG9tZXI=",
            "existType": "NONE",
            "Ch": false,
            "Incr": false,
            "zSetEntries": entries,
        })
        .to_string()
    }

    fn expected(email: &str, birth_year: &str) -> Option<EmailBirthYear> {
        Some(EmailBirthYear {
            email: email.to_string(),
            birth_year: birth_year.to_string(),
        })
    }

    #[test]
    fn test_end_to_end_sam_test() {
        let job = CustomerBirthYearJob::new();
        let encoded = STANDARD.encode(SAM_TEST);
        let envelope = envelope_with_elements(&[&encoded]);

        assert_eq!(
            job.derive(Some(&envelope)),
            expected("sam.test@test.com", "2001")
        );
    }

    #[test]
    fn test_envelope_with_both_entry_casings() {
        let job = CustomerBirthYearJob::new();
        let exact = STANDARD.encode(SAM_TEST);
        let variant = STANDARD.encode(r#"{"email":"other@test.com","birthDay":"1999-02-02"}"#);
        let envelope = json!({
            "key": "Q3VzdG9tZXI=",
            "zsetEntries": [{"element": variant, "score": 0.0}],
            "zSetEntries": [{"element": exact, "Score": 0.0}],
        })
        .to_string();

        assert_eq!(
            job.derive(Some(&envelope)),
            expected("sam.test@test.com", "2001")
        );
    }

    #[test]
    fn test_only_first_entry_is_used() {
        let job = CustomerBirthYearJob::new();
        let first = STANDARD.encode(r#"{"email":"gail.spencer@test.com","birthDay":"1963-04-12"}"#);
        let second = STANDARD.encode(SAM_TEST);
        let envelope = envelope_with_elements(&[&first, &second]);

        assert_eq!(
            job.derive(Some(&envelope)),
            expected("gail.spencer@test.com", "1963")
        );
    }

    #[test]
    fn test_empty_entries_produce_no_row() {
        let job = CustomerBirthYearJob::new();
        assert_eq!(job.derive(Some(&envelope_with_elements::<&str>(&[]))), None);
        assert_eq!(job.derive(Some(r#"{"key":"dGVzdDI=","existType":"NONE"}"#)), None);
    }

    #[test]
    fn test_null_birth_day_is_filtered() {
        let job = CustomerBirthYearJob::new();
        let encoded = STANDARD.encode(r#"{"customerName":"No Birthday","email":"nb@test.com"}"#);
        assert_eq!(job.derive(Some(&envelope_with_elements(&[&encoded]))), None);
    }

    #[test]
    fn test_null_email_is_filtered() {
        let job = CustomerBirthYearJob::new();
        let encoded = STANDARD.encode(r#"{"customerName":"No Email","email":null,"birthDay":"1960-01-01"}"#);
        assert_eq!(job.derive(Some(&envelope_with_elements(&[&encoded]))), None);
    }

    #[test]
    fn test_non_customer_element_is_filtered() {
        let job = CustomerBirthYearJob::new();
        let plain = STANDARD.encode("test2");
        let not_base64 = "%%% not base64 %%%";

        assert_eq!(job.derive(Some(&envelope_with_elements(&[&plain]))), None);
        assert_eq!(job.derive(Some(&envelope_with_elements(&[not_base64]))), None);
    }

    #[test]
    fn test_malformed_envelope_is_filtered() {
        let job = CustomerBirthYearJob::new();
        assert_eq!(job.derive(Some("{\"zSetEntries\":")), None);
        assert_eq!(job.derive(None), None);
    }

    #[test]
    fn test_base64_round_trip_recovers_customer() {
        let job = CustomerBirthYearJob::new();
        let change = RedisSortedSet {
            z_set_entries: Some(vec![crate::records::ZSetEntry {
                element: Some(STANDARD.encode(SAM_TEST)),
                score: Some("0.0".to_string()),
            }]),
            ..Default::default()
        };

        let customer = job.decode_customer(&change);
        assert_eq!(
            customer,
            Customer {
                customer_name: Some("Sam Test".to_string()),
                email: Some("sam.test@test.com".to_string()),
                phone: Some("8015551212".to_string()),
                birth_day: Some("2001-01-03".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_base64_text_leniency() {
        assert_eq!(decode_base64_text("dGVzdDI=").as_deref(), Some("test2"));
        assert_eq!(decode_base64_text("dGVzdDI").as_deref(), Some("test2"));
        assert_eq!(decode_base64_text("dGVz\ndDI=").as_deref(), Some("test2"));
        assert_eq!(decode_base64_text("not base64!"), None);
    }

    #[test]
    fn test_birth_year() {
        assert_eq!(birth_year("1963-04-12"), "1963");
        assert_eq!(birth_year("1963"), "1963");
        assert_eq!(birth_year(""), "");
        assert_eq!(birth_year("-04-12"), "");
    }

    #[test]
    fn test_transform_filters_and_projects() {
        let job = CustomerBirthYearJob::new();
        let kept = SourceMessage::new(
            "redis-server",
            0,
            0,
            envelope_with_elements(&[&STANDARD.encode(SAM_TEST)]),
        );
        let dropped = SourceMessage::new("redis-server", 0, 1, envelope_with_elements::<&str>(&[]));

        assert_eq!(
            job.transform(&kept),
            Some(Row(vec![
                Some("sam.test@test.com".to_string()),
                Some("2001".to_string())
            ]))
        );
        assert_eq!(job.transform(&dropped), None);
        assert_eq!(job.columns(), &["email", "birthYear"]);
    }
}
