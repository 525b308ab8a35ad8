// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Records decoded from message payloads.
//!
//! Every field is optional: these are always produced through a permissive
//! [`Schema`](crate::schema::Schema), so a field the payload lacked, or got
//! wrong, is simply `None`.

use serde::{Deserialize, Serialize};

/// Customer risk event from `stedi-events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRisk {
    pub customer: Option<String>,
    /// Numeric risk score carried as text
    pub score: Option<String>,
    /// ISO date
    pub risk_date: Option<String>,
}

/// Change notification from `redis-server`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisSortedSet {
    pub key: Option<String>,
    pub value: Option<String>,
    pub expired_type: Option<String>,
    pub expired_value: Option<String>,
    pub exist_type: Option<String>,
    pub ch: Option<bool>,
    pub incr: Option<bool>,
    pub z_set_entries: Option<Vec<ZSetEntry>>,
}

impl RedisSortedSet {
    /// Element of the first sorted set entry, still base64 encoded.
    pub fn encoded_customer(&self) -> Option<&str> {
        self.z_set_entries
            .as_ref()?
            .first()?
            .element
            .as_deref()
    }
}

/// One member of a sorted set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZSetEntry {
    pub element: Option<String>,
    pub score: Option<String>,
}

/// Customer stored in redis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_day: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(element: Option<&str>) -> ZSetEntry {
        ZSetEntry {
            element: element.map(str::to_string),
            score: Some("0.0".to_string()),
        }
    }

    #[test]
    fn test_encoded_customer_takes_first_entry() {
        let change = RedisSortedSet {
            z_set_entries: Some(vec![entry(Some("first")), entry(Some("second"))]),
            ..Default::default()
        };
        assert_eq!(change.encoded_customer(), Some("first"));
    }

    #[test]
    fn test_encoded_customer_absent() {
        let missing = RedisSortedSet::default();
        let empty = RedisSortedSet {
            z_set_entries: Some(vec![]),
            ..Default::default()
        };
        let null_element = RedisSortedSet {
            z_set_entries: Some(vec![entry(None), entry(Some("second"))]),
            ..Default::default()
        };

        assert_eq!(missing.encoded_customer(), None);
        assert_eq!(empty.encoded_customer(), None);
        assert_eq!(null_element.encoded_customer(), None);
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = serde_json::to_value(Customer {
            customer_name: Some("Sam Test".to_string()),
            birth_day: Some("2001-01-03".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["customerName"], "Sam Test");
        assert_eq!(json["birthDay"], "2001-01-03");
    }
}
