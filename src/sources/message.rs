// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::borrow::Cow;

/// One message pulled from the bus, payload still raw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<Vec<u8>>,
    /// `None` for tombstones
    pub value: Option<Vec<u8>>,
    /// Milliseconds since the epoch, when the broker supplied one
    pub timestamp: Option<i64>,
}

impl SourceMessage {
    pub fn new(topic: &str, partition: i32, offset: i64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.to_string(),
            partition,
            offset,
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Payload cast to text. Invalid UTF-8 is replaced rather than rejected.
    pub fn value_text(&self) -> Option<Cow<'_, str>> {
        self.value.as_deref().map(String::from_utf8_lossy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text() {
        let message = SourceMessage::new("stedi-events", 0, 7, r#"{"customer":"a"}"#);
        assert_eq!(message.value_text().as_deref(), Some(r#"{"customer":"a"}"#));

        let tombstone = SourceMessage {
            value: None,
            ..message.clone()
        };
        assert_eq!(tombstone.value_text(), None);

        let binary = SourceMessage::new("stedi-events", 0, 8, vec![0xff, b'a']);
        assert_eq!(binary.value_text().as_deref(), Some("\u{fffd}a"));
    }
}
