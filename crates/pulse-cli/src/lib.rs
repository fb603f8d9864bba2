//! Command-line helpers for building and inspecting Pulse events

pub mod config;

pub use config::{Cli, Command, Format, LogFormat};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_core::{AttributeValue, Event, EventError, COUNT, DURATION, TIMESTAMP};
use thiserror::Error;

/// Errors from command-line input
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid attribute '{0}': expected name=value")]
    InvalidAttribute(String),

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Event(#[from] EventError),
}

/// Parse a `name=value` attribute argument
pub fn parse_attribute(arg: &str) -> Result<(String, AttributeValue), CliError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), parse_value(value))),
        _ => Err(CliError::InvalidAttribute(arg.to_string())),
    }
}

/// Infer the value kind: integer, finite float, boolean, RFC 3339 timestamp,
/// then text
///
/// Words such as `nan` or `inf` stay text.
pub fn parse_value(value: &str) -> AttributeValue {
    if let Ok(v) = value.parse::<i64>() {
        return AttributeValue::Integer(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => return AttributeValue::Float(v),
        _ => {}
    }
    if let Ok(v) = value.parse::<bool>() {
        return AttributeValue::Boolean(v);
    }
    if let Ok(v) = DateTime::parse_from_rfc3339(value) {
        return AttributeValue::Timestamp(v.with_timezone(&Utc));
    }
    AttributeValue::Text(value.to_string())
}

/// Options for building an event on the command line
#[derive(Debug, Clone, Default)]
pub struct EventSpec {
    pub key: String,
    pub count: Option<i64>,
    pub duration: Option<i64>,
    pub timestamp: bool,
    pub attributes: Vec<(String, AttributeValue)>,
    pub transient: bool,
}

impl EventSpec {
    /// Build the event; the well-known flags win over `--attr` entries of the
    /// same name
    pub fn build(self) -> Event {
        let mut event = Event::new(self.key);

        if !self.attributes.is_empty() {
            let attributes: BTreeMap<String, AttributeValue> = self.attributes.into_iter().collect();
            event.set_attributes(Some(attributes));
        }
        if let Some(count) = self.count {
            event.set_attribute(&COUNT, Some(count));
        }
        if let Some(duration) = self.duration {
            event.set_attribute(&DURATION, Some(duration));
        }
        if self.timestamp {
            event.set_attribute(&TIMESTAMP, Some(Utc::now()));
        }
        if self.transient {
            event.set_transient();
        }

        event
    }
}

/// Serialize an event as hex-encoded postcard or JSON
pub fn encode(event: &Event, format: Format) -> Result<String, CliError> {
    if event.is_transient() {
        tracing::warn!(event = %event.key(), "Transient flag is not serialized");
    }
    match format {
        Format::Postcard => Ok(hex::encode(event.to_bytes()?)),
        Format::Json => Ok(event.to_json()?),
    }
}

/// Parse an event from hex-encoded postcard or JSON
pub fn decode(input: &str, format: Format) -> Result<Event, CliError> {
    let input = input.trim();
    match format {
        Format::Postcard => Ok(Event::from_bytes(&hex::decode(input)?)?),
        Format::Json => Ok(Event::from_json(input)?),
    }
}

/// Multi-line description of an event: summary then one line per attribute
pub fn describe(event: &Event) -> String {
    let mut out = event.to_string();
    for (name, value) in event.attributes().unwrap_or_default() {
        out.push_str(&format!("\n  {} ({}) = {}", name, value.kind(), value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::ValueKind;

    #[test]
    fn test_parse_value_kinds() {
        assert_eq!(parse_value("42"), AttributeValue::Integer(42));
        assert_eq!(parse_value("-7"), AttributeValue::Integer(-7));
        assert_eq!(parse_value("2.5"), AttributeValue::Float(2.5));
        assert_eq!(parse_value("true"), AttributeValue::Boolean(true));
        assert_eq!(parse_value("brush").kind(), ValueKind::Text);
        assert_eq!(parse_value("2024-05-01T12:00:00Z").kind(), ValueKind::Timestamp);

        for word in ["nan", "NaN", "inf", "-inf", "infinity", "Infinity"] {
            assert_eq!(parse_value(word), AttributeValue::Text(word.to_string()));
        }
    }

    #[test]
    fn test_parse_attribute() {
        let (name, value) = parse_attribute("tool=a=b").unwrap();
        assert_eq!(name, "tool");
        assert_eq!(value, AttributeValue::Text("a=b".into()));

        assert!(matches!(
            parse_attribute("=5"),
            Err(CliError::InvalidAttribute(_))
        ));
        assert!(matches!(
            parse_attribute("missing"),
            Err(CliError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_build_flags_override_attributes() {
        let event = EventSpec {
            key: "login".into(),
            count: Some(2),
            attributes: vec![
                ("count".into(), AttributeValue::Integer(9)),
                ("tool".into(), AttributeValue::Text("brush".into())),
            ],
            ..Default::default()
        }
        .build();

        assert_eq!(event.attribute(&COUNT).unwrap(), Some(2));
        assert_eq!(
            event.attribute_value("tool"),
            Some(&AttributeValue::Text("brush".into()))
        );
        assert!(event.attribute(&DURATION).unwrap().is_none());
        assert!(!event.is_transient());
    }

    #[test]
    fn test_encode_decode_postcard_hex() {
        let event = EventSpec {
            key: "login".into(),
            count: Some(2),
            transient: true,
            ..Default::default()
        }
        .build();

        let hex = encode(&event, Format::Postcard).unwrap();
        let decoded = decode(&format!("  {}\n", hex), Format::Postcard).unwrap();
        assert_eq!(decoded.key(), "login");
        assert_eq!(decoded.attribute(&COUNT).unwrap(), Some(2));
        assert!(!decoded.is_transient());
    }

    #[test]
    fn test_decode_invalid_hex() {
        assert!(matches!(
            decode("zz", Format::Postcard),
            Err(CliError::InvalidHex(_))
        ));
        assert!(matches!(
            decode("{}", Format::Json),
            Err(CliError::Event(EventError::DecodeFailed(_)))
        ));
    }

    #[test]
    fn test_describe() {
        let event = Event::new("save").with_count(1).with_duration(20);
        assert_eq!(
            describe(&event),
            "Event{key=save, attributes={count=1, duration=20}}\n  count (integer) = 1\n  duration (integer) = 20"
        );

        assert_eq!(describe(&Event::new("idle")), "Event{key=idle, attributes=none}");
    }
}
