//! Error types for Pulse events

use thiserror::Error;

use crate::attribute::ValueKind;

/// Errors that can occur when reading, encoding or decoding events
#[derive(Debug, Error)]
pub enum EventError {
    /// A typed read found a value of a different kind under the key
    #[error("Attribute type mismatch for '{key}': expected {expected}, found {actual}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),

    #[error("Failed to decode event: {0}")]
    DecodeFailed(String),
}

impl From<postcard::Error> for EventError {
    fn from(e: postcard::Error) -> Self {
        match e {
            postcard::Error::SerializeBufferFull
            | postcard::Error::SerializeSeqLengthUnknown
            | postcard::Error::SerdeSerCustom => EventError::EncodeFailed(e.to_string()),
            _ => EventError::DecodeFailed(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for EventError {
    fn from(e: serde_json::Error) -> Self {
        EventError::DecodeFailed(e.to_string())
    }
}

/// Result type alias for event operations
pub type EventResult<T> = Result<T, EventError>;
