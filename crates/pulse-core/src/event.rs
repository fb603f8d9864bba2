//! Usage events
//!
//! An [`Event`] is identified by a key fixed at construction and decorated
//! with typed attributes and an optional transient flag through chained calls.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKey, AttributeType, AttributeValue, COUNT, DURATION, TIMESTAMP};
use crate::error::{EventError, EventResult};

/// A usage event
///
/// The attribute map never holds an empty entry: clearing a key removes it,
/// and an empty map reads back as "no attributes". The transient flag is a
/// local signal only and is skipped by every serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    key: String,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
    #[serde(skip)]
    transient: bool,
}

impl Event {
    /// Create a new event with the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: BTreeMap::new(),
            transient: false,
        }
    }

    /// Set the [`COUNT`] attribute
    pub fn with_count(mut self, count: i64) -> Self {
        self.set_attribute(&COUNT, Some(count));
        self
    }

    /// Set the [`DURATION`] attribute, in milliseconds
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.set_attribute(&DURATION, Some(duration));
        self
    }

    /// Set the [`DURATION`] attribute from a measured duration
    ///
    /// Durations longer than `i64::MAX` milliseconds saturate.
    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        let millis = i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX);
        self.with_duration(millis)
    }

    /// Set the [`TIMESTAMP`] attribute to the current time
    pub fn with_timestamp(mut self) -> Self {
        self.set_attribute(&TIMESTAMP, Some(Utc::now()));
        self
    }

    /// Set an arbitrary attribute, consuming and returning the event
    pub fn with_attribute<T: AttributeType>(mut self, key: &AttributeKey<T>, value: T) -> Self {
        self.set_attribute(key, Some(value));
        self
    }

    /// Mark the event transient, consuming and returning it
    pub fn transient(mut self) -> Self {
        self.set_transient();
        self
    }

    /// Get the event key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a snapshot of the attributes indexed by name
    ///
    /// Returns `None` when the event carries no attributes.
    pub fn attributes(&self) -> Option<BTreeMap<String, AttributeValue>> {
        if self.attributes.is_empty() {
            None
        } else {
            Some(self.attributes.clone())
        }
    }

    /// Replace all attributes with a new set indexed by name
    ///
    /// `None` or an empty map clears the attributes. Values are stored as
    /// given; a later typed read with a key of a different type fails with
    /// [`EventError::TypeMismatch`].
    pub fn set_attributes(&mut self, attributes: Option<BTreeMap<String, AttributeValue>>) {
        self.attributes = attributes.unwrap_or_default();
        tracing::trace!(
            event = %self.key,
            attributes = self.attributes.len(),
            "Replaced event attributes"
        );
    }

    /// Set or clear an attribute
    ///
    /// `Some` stores or overwrites the value; `None` removes the attribute if
    /// present.
    pub fn set_attribute<T: AttributeType>(
        &mut self,
        key: &AttributeKey<T>,
        value: Option<T>,
    ) -> &mut Self {
        match value {
            Some(value) => {
                self.attributes
                    .insert(key.name().to_string(), value.into_value());
            }
            None => {
                self.attributes.remove(key.name());
            }
        }
        self
    }

    /// Remove an attribute, returning the value it held
    pub fn remove_attribute<T>(&mut self, key: &AttributeKey<T>) -> Option<AttributeValue> {
        self.attributes.remove(key.name())
    }

    /// Get a typed attribute
    ///
    /// Returns `Ok(None)` when the attribute is not set. Reading a value with
    /// a key whose type does not match what was stored is a caller error and
    /// is reported as [`EventError::TypeMismatch`].
    pub fn attribute<T: AttributeType>(&self, key: &AttributeKey<T>) -> EventResult<Option<T>> {
        let Some(value) = self.attributes.get(key.name()) else {
            return Ok(None);
        };

        T::from_value(value)
            .map(Some)
            .ok_or_else(|| EventError::TypeMismatch {
                key: key.name().to_string(),
                expected: T::KIND,
                actual: value.kind(),
            })
    }

    /// Get an attribute value by name without a type check
    pub fn attribute_value(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Check whether any attributes are set
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Mark the event transient
    ///
    /// Transient events are only broadcast to in-process listeners, never
    /// stored or transmitted. The flag cannot be cleared.
    pub fn set_transient(&mut self) -> &mut Self {
        self.transient = true;
        self
    }

    /// Check whether the event is transient
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub(crate) fn from_parts(key: String, attributes: BTreeMap<String, AttributeValue>) -> Self {
        Self {
            key,
            attributes,
            transient: false,
        }
    }

    pub(crate) fn attribute_map(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event{{key={}, attributes=", self.key)?;
        if self.attributes.is_empty() {
            return write!(f, "none}}");
        }
        write!(f, "{{")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, "}}}}")
    }
}
