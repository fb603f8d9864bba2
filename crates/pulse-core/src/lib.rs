//! # Pulse Core
//!
//! Usage events with typed attributes for Pulse.
//!
//! An [`Event`] carries a fixed key, a set of named attributes and a
//! transient flag. Attributes are read and written through typed
//! [`AttributeKey`]s; the event stores them as [`AttributeValue`]s.
//!
//! ## Key Types
//!
//! - [`Event`]: The event record, with builder-style setters
//! - [`AttributeKey`]: Named attribute identifier, equal by name
//! - [`AttributeValue`]: Stored attribute value (integer, float, boolean, text, timestamp)
//! - [`WireEvent`]: Versioned envelope used by [`Event::to_bytes`]
//!
//! ## Example
//!
//! ```
//! use pulse_core::{Event, COUNT, DURATION};
//!
//! let event = Event::new("login").with_count(2).with_duration(150);
//! assert_eq!(event.attribute(&COUNT).unwrap(), Some(2));
//!
//! let decoded = Event::from_bytes(&event.to_bytes().unwrap()).unwrap();
//! assert_eq!(decoded.attribute(&DURATION).unwrap(), Some(150));
//! ```

pub mod attribute;
pub mod codec;
pub mod error;
pub mod event;

// Re-export main types
pub use attribute::*;
pub use codec::*;
pub use error::*;
pub use event::*;
