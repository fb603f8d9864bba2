//! Event encoding
//!
//! Events are encoded with postcard inside a versioned envelope, or as JSON
//! for diagnostics. Neither form carries the transient flag, so a decoded
//! event is never transient.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeValue;
use crate::error::{EventError, EventResult};
use crate::event::Event;

/// Wire format for events (versioned for future compatibility)
#[derive(Debug, Serialize, Deserialize)]
pub enum WireEvent<'a> {
    /// Version 0 format
    V0 {
        /// Event key
        key: Cow<'a, str>,
        /// Attributes indexed by name
        attributes: Cow<'a, BTreeMap<String, AttributeValue>>,
    },
}

impl<'a> WireEvent<'a> {
    fn borrowed(event: &'a Event) -> Self {
        WireEvent::V0 {
            key: Cow::Borrowed(event.key()),
            attributes: Cow::Borrowed(event.attribute_map()),
        }
    }

    fn into_event(self) -> Event {
        let WireEvent::V0 { key, attributes } = self;
        Event::from_parts(key.into_owned(), attributes.into_owned())
    }
}

impl Event {
    /// Encode the event with postcard
    pub fn to_bytes(&self) -> EventResult<Vec<u8>> {
        let bytes = postcard::to_allocvec(&WireEvent::borrowed(self))?;
        tracing::debug!(event = %self.key(), len = bytes.len(), "Encoded event");
        Ok(bytes)
    }

    /// Decode an event produced by [`Event::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> EventResult<Self> {
        let wire: WireEvent<'static> = postcard::from_bytes(bytes)?;
        let event = wire.into_event();
        tracing::debug!(event = %event.key(), len = bytes.len(), "Decoded event");
        Ok(event)
    }

    /// Render the event as JSON
    ///
    /// JSON has no NaN or infinity, so events holding a non-finite float
    /// attribute fail with [`EventError::EncodeFailed`]; use
    /// [`Event::to_bytes`] for those.
    pub fn to_json(&self) -> EventResult<String> {
        if let Some((name, value)) = self
            .attribute_map()
            .iter()
            .find(|(_, value)| matches!(value, AttributeValue::Float(v) if !v.is_finite()))
        {
            return Err(EventError::EncodeFailed(format!(
                "attribute '{}' holds {}, which JSON cannot represent",
                name, value
            )));
        }
        serde_json::to_string(self).map_err(|e| EventError::EncodeFailed(e.to_string()))
    }

    /// Parse an event from JSON produced by [`Event::to_json`]
    ///
    /// A missing `attributes` field reads as no attributes.
    pub fn from_json(json: &str) -> EventResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeKey, COUNT, DURATION, TIMESTAMP};

    #[test]
    fn test_roundtrip_drops_transient() {
        let event = Event::new("login").with_count(2).transient();
        assert!(event.is_transient());

        let bytes = event.to_bytes().unwrap();
        let decoded = Event::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.key(), "login");
        assert_eq!(decoded.attribute(&COUNT).unwrap(), Some(2));
        assert!(!decoded.is_transient());
    }

    #[test]
    fn test_roundtrip_all_value_kinds() {
        let label: AttributeKey<String> = AttributeKey::new("label");
        let ratio: AttributeKey<f64> = AttributeKey::new("ratio");
        let dirty: AttributeKey<bool> = AttributeKey::new("dirty");

        let event = Event::new("export")
            .with_count(10)
            .with_duration(250)
            .with_timestamp()
            .with_attribute(&label, "world.png".to_string())
            .with_attribute(&ratio, 0.75)
            .with_attribute(&dirty, true);

        let decoded = Event::from_bytes(&event.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.attributes(), event.attributes());
        assert_eq!(
            decoded.attribute(&TIMESTAMP).unwrap(),
            event.attribute(&TIMESTAMP).unwrap()
        );
        assert_eq!(decoded.attribute(&DURATION).unwrap(), Some(250));
    }

    #[test]
    fn test_roundtrip_without_attributes() {
        let event = Event::new("idle");
        let decoded = Event::from_bytes(&event.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.key(), "idle");
        assert!(decoded.attributes().is_none());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = Event::from_bytes(&[0xFF, 0xFF, 0xFF]);
        assert!(matches!(result, Err(EventError::DecodeFailed(_))));

        let result = Event::from_bytes(&[]);
        assert!(matches!(result, Err(EventError::DecodeFailed(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let event = Event::new("login").with_count(2).with_duration(40).transient();

        let json = event.to_json().unwrap();
        assert!(json.contains("\"key\":\"login\""));
        assert!(!json.contains("transient"));

        let decoded = Event::from_json(&json).unwrap();
        assert_eq!(decoded.attributes(), event.attributes());
        assert!(!decoded.is_transient());
    }

    #[test]
    fn test_json_rejects_non_finite_floats() {
        let ratio: AttributeKey<f64> = AttributeKey::new("ratio");

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let event = Event::new("x").with_attribute(&ratio, value);
            let result = event.to_json();
            assert!(
                matches!(&result, Err(EventError::EncodeFailed(msg)) if msg.contains("ratio")),
                "Expected EncodeFailed for {}, got {:?}",
                value,
                result
            );

            // The binary form still carries the value
            let decoded = Event::from_bytes(&event.to_bytes().unwrap()).unwrap();
            let stored = decoded.attribute(&ratio).unwrap().unwrap();
            assert_eq!(stored.is_nan(), value.is_nan());
            assert!(!stored.is_finite());
        }

        let event = Event::new("x").with_attribute(&ratio, 0.5);
        let decoded = Event::from_json(&event.to_json().unwrap()).unwrap();
        assert_eq!(decoded.attribute(&ratio).unwrap(), Some(0.5));
    }

    #[test]
    fn test_json_without_attributes_field() {
        let decoded = Event::from_json(r#"{"key":"open"}"#).unwrap();
        assert_eq!(decoded.key(), "open");
        assert!(decoded.attributes().is_none());
    }

    #[test]
    fn test_json_tagged_values() {
        let json = r#"{"key":"open","attributes":{"count":{"integer":3},"name":{"text":"a"}}}"#;
        let decoded = Event::from_json(json).unwrap();
        assert_eq!(decoded.attribute(&COUNT).unwrap(), Some(3));
        assert_eq!(
            decoded.attribute_value("name"),
            Some(&AttributeValue::Text("a".into()))
        );
    }

    #[test]
    fn test_malformed_json_fails() {
        let result = Event::from_json("{\"attributes\":{}}");
        assert!(matches!(result, Err(EventError::DecodeFailed(_))));
    }
}
