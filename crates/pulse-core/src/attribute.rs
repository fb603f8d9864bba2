//! Typed attribute keys and erased attribute values
//!
//! An [`AttributeKey<T>`] names an attribute and carries the Rust type its
//! value is expected to have. The event itself stores values as
//! [`AttributeValue`], so the type parameter only guides reads and writes at
//! the call site. Two keys are the same attribute when their names match,
//! whatever their type parameter says.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The number of times the event occurred
pub const COUNT: AttributeKey<i64> = AttributeKey::from_static("count");

/// How long the event lasted, in milliseconds
pub const DURATION: AttributeKey<i64> = AttributeKey::from_static("duration");

/// When the event started
pub const TIMESTAMP: AttributeKey<DateTime<Utc>> = AttributeKey::from_static("timestamp");

/// A named attribute identifier with a phantom value type
pub struct AttributeKey<T> {
    name: Cow<'static, str>,
    _type: PhantomData<fn() -> T>,
}

impl<T> AttributeKey<T> {
    /// Create a key from a static name (usable in `const` items)
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _type: PhantomData,
        }
    }

    /// Create a key from an owned name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _type: PhantomData,
        }
    }

    /// Get the attribute name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for AttributeKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> PartialEq for AttributeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AttributeKey<T> {}

impl<T> Hash for AttributeKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttributeKey").field(&self.name).finish()
    }
}

impl<T> fmt::Display for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Kind of a stored attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    Text,
    Timestamp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// An attribute value as stored on an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl AttributeValue {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// Rust types that can be stored as an attribute value
///
/// `from_value` returns `None` when the stored value has a different kind;
/// callers turn that into a type-mismatch error.
pub trait AttributeType: Sized {
    /// The value kind this type is stored as
    const KIND: ValueKind;

    /// Wrap into an erased value
    fn into_value(self) -> AttributeValue;

    /// Extract from an erased value, if the kind matches
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

impl AttributeType for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn into_value(self) -> AttributeValue {
        AttributeValue::Integer(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_integer()
    }
}

impl AttributeType for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn into_value(self) -> AttributeValue {
        AttributeValue::Float(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_float()
    }
}

impl AttributeType for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn into_value(self) -> AttributeValue {
        AttributeValue::Boolean(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_bool()
    }
}

impl AttributeType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> AttributeValue {
        AttributeValue::Text(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl AttributeType for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn into_value(self) -> AttributeValue {
        AttributeValue::Timestamp(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        value.as_timestamp()
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}
