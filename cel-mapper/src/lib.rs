//! `cel-mapper` is a library for mapping records from Asterisk's
//! [Channel Event Log](https://docs.asterisk.org/Configuration/Reporting/Channel-Event-Logging-CEL/)
//! (in its CSV form) into typed event structs.
//!
//! Records are supplied already split into fields, e.g. by the `csv` crate.
//! Each struct field names the record field that feeds it with a directive
//! of the form `index[,json][,noerror]`:
//!
//! ```ignore
//! use cel_mapper::{unmarshal_event, Event};
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Debug, Default, Event)]
//! pub struct ChannelEvent {
//!     #[cel("0")]
//!     pub event_type: String,
//!     #[cel("1")]
//!     pub event_time: DateTime<Utc>,
//!     #[cel("19,json,noerror")]
//!     pub extra: serde_json::Value,
//! }
//!
//! let mut event = ChannelEvent::default();
//! unmarshal_event(&record, &mut event)?;
//! ```
//!
//! Only `pub` fields are mapped. Without `json`, fields must be `String`s or
//! `DateTime<Utc>`s; with `json`, any [`Deserialize`](serde::Deserialize) type works.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![allow(clippy::redundant_field_names)]
#![forbid(unsafe_code)]

pub mod error;
pub mod map;
pub mod tag;
pub mod time;
mod unmarshal;

#[cfg(feature = "derive")]
pub use cel_derive::Event;

pub use self::error::{Error, FieldError, InvalidTargetError};
pub use self::map::{Destination, Event, Field, Kind, Slot};
pub use self::tag::{Tag, TagError};
pub use self::time::{parse_asterisk_timestamp, TimestampError};
pub use self::unmarshal::{from_record, unmarshal_event};
