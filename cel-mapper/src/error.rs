//! Errors for `cel-mapper`.

use thiserror::Error as ThisError;

use crate::tag::TagError;
use crate::time::TimestampError;

/// An invalid argument was passed to [`unmarshal_event`](crate::unmarshal_event).
///
/// The destination must be a non-nil pointer to an [`Event`](crate::Event) struct.
/// Each variant carries the rejected destination's type name, where it has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum InvalidTargetError {
    /// No destination at all.
    #[error("cel: UnmarshalEvent(nil)")]
    Nil,
    /// A nil (`None`) pointer to an event struct.
    #[error("cel: UnmarshalEvent(nil *{0})")]
    NilPointer(&'static str),
    /// A destination that isn't a pointer, e.g. a struct or integer passed by value.
    #[error("cel: UnmarshalEvent(non-pointer {0})")]
    NonPointer(&'static str),
    /// A pointer to something other than an event struct.
    #[error("cel: UnmarshalEvent(pointer to non-struct *{0})")]
    NonStruct(&'static str),
}

/// Errors that can occur while mapping a single record field into a struct field.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum FieldError {
    /// The field's directive couldn't be parsed.
    #[error(transparent)]
    BadTag(#[from] TagError),
    /// The field's directive names a record field that doesn't exist.
    #[error("record index {index} out of range ({len} fields)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of fields in the record.
        len: usize,
    },
    /// The field's type has no direct conversion.
    #[error("type {0} not implemented")]
    Unsupported(&'static str),
    /// The record value couldn't be converted into the field's type.
    #[error("unable to convert field value {value:?} to {ty}: {source}")]
    Conversion {
        /// The raw record value.
        value: String,
        /// The field's type.
        ty: &'static str,
        /// The underlying conversion failure.
        #[source]
        source: TimestampError,
    },
    /// The record value couldn't be decoded as JSON into the field's type.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// All possible errors that can occur while mapping a record.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The destination isn't a non-nil pointer to an event struct.
    #[error(transparent)]
    InvalidTarget(#[from] InvalidTargetError),
    /// We couldn't map a particular struct field.
    #[error("failed to map field {field}: {source}")]
    Field {
        /// The name of the struct field.
        field: &'static str,
        /// Why the field couldn't be mapped.
        #[source]
        source: FieldError,
    },
}

impl Error {
    /// Returns the name of the struct field that failed to map, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidTarget(_) => None,
            Error::Field { field, .. } => Some(*field),
        }
    }

    /// Returns the underlying field mapping failure, if any.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            Error::InvalidTarget(_) => None,
            Error::Field { source, .. } => Some(source),
        }
    }
}
