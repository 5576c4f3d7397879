//! Traits and descriptors for mapping records into event structs.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::InvalidTargetError;

/// The type name used when a timestamp conversion fails.
pub(crate) const TIMESTAMP_TYPE_NAME: &str = "DateTime<Utc>";

/// The directly convertible representation of a struct field.
///
/// This is a closed list: fields that aren't [`Kind::Text`] or
/// [`Kind::Timestamp`] can only be mapped with the `json` modifier. Types that
/// aren't [`Slot`]s at all (e.g. `std::sync::mpsc::Sender<String>`) can't be
/// settable fields, and are rejected at compile time instead.
#[derive(Debug)]
pub enum Kind<'a> {
    /// A `String` field, assigned the raw record value.
    Text(&'a mut String),
    /// A `DateTime<Utc>` field, parsed from an Asterisk timestamp.
    Timestamp(&'a mut DateTime<Utc>),
    /// Anything else.
    Other,
}

/// A mutable handle to a single struct field's storage.
///
/// Every `'static` type that implements [`Deserialize`](serde::Deserialize)
/// is a `Slot`.
pub trait Slot {
    /// Returns the name of the field's type.
    fn type_name(&self) -> &'static str;

    /// Returns the field's directly convertible representation, if it has one.
    fn kind(&mut self) -> Kind<'_>;

    /// Decode `raw` as JSON, replacing the field's value on success.
    ///
    /// The field is left untouched on failure.
    fn decode_json(&mut self, raw: &str) -> Result<(), serde_json::Error>;
}

impl<T> Slot for T
where
    T: DeserializeOwned + Any,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn kind(&mut self) -> Kind<'_> {
        let any: &mut (dyn Any + 'static) = self;

        if any.is::<String>() {
            any.downcast_mut::<String>().map_or(Kind::Other, Kind::Text)
        } else if any.is::<DateTime<Utc>>() {
            any.downcast_mut::<DateTime<Utc>>()
                .map_or(Kind::Other, Kind::Timestamp)
        } else {
            Kind::Other
        }
    }

    fn decode_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(raw)?;
        Ok(())
    }
}

/// Describes a single struct field: its name, its directive, and (if it's
/// settable) its storage.
pub struct Field<'a> {
    name: &'static str,
    tag: &'static str,
    slot: Option<&'a mut dyn Slot>,
}

impl<'a> Field<'a> {
    /// Create a settable field with the given name and directive.
    ///
    /// An empty `tag` marks the field as unmapped.
    pub fn new(name: &'static str, tag: &'static str, slot: &'a mut dyn Slot) -> Self {
        Self {
            name: name,
            tag: tag,
            slot: Some(slot),
        }
    }

    /// Create a field that can't be set, e.g. a private struct field.
    ///
    /// Unsettable fields are always skipped, regardless of their directive.
    pub fn unsettable(name: &'static str, tag: &'static str) -> Self {
        Self {
            name: name,
            tag: tag,
            slot: None,
        }
    }

    /// Returns the field's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's raw directive.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns whether this field can be set.
    pub fn is_settable(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn into_slot(self) -> Option<&'a mut dyn Slot> {
        self.slot
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("settable", &self.is_settable())
            .finish()
    }
}

/// A struct whose fields can be filled from a record.
///
/// Implementations are normally generated with `#[derive(Event)]`.
pub trait Event {
    /// The struct's name, as used in error messages.
    ///
    /// `#[derive(Event)]` uses the bare identifier, so `Foo<T>` is named `Foo`.
    const NAME: &'static str;

    /// Returns a descriptor for every field in the struct, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A value passed as the destination of [`unmarshal_event`](crate::unmarshal_event).
///
/// Only non-nil pointers to [`Event`] structs are valid destinations; everything
/// else that implements this trait exists to be rejected with a precise error.
pub trait Destination {
    /// Returns the destination's field descriptors, or why it isn't a valid destination.
    fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError>;
}

impl<T: Event> Destination for &mut T {
    fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError> {
        Ok(<T as Event>::fields(&mut **self))
    }
}

impl<T: Event> Destination for Option<&mut T> {
    fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError> {
        match self {
            Some(event) => Ok(<T as Event>::fields(&mut **event)),
            None => Err(InvalidTargetError::NilPointer(T::NAME)),
        }
    }
}

/// The nil destination.
impl Destination for () {
    fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError> {
        Err(InvalidTargetError::Nil)
    }
}

/// Rejects an [`Event`] struct that was passed by value rather than by pointer.
///
/// `#[derive(Event)]` implements [`Destination`] for the struct itself with
/// this.
pub fn reject_by_value<T: Event>() -> InvalidTargetError {
    InvalidTargetError::NonPointer(T::NAME)
}

macro_rules! impl_non_struct_destination {
    ($($ty:ty),+) => {
        $(
            impl Destination for $ty {
                fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError> {
                    Err(InvalidTargetError::NonPointer(stringify!($ty)))
                }
            }

            impl Destination for &mut $ty {
                fn resolve(&mut self) -> Result<Vec<Field<'_>>, InvalidTargetError> {
                    Err(InvalidTargetError::NonStruct(stringify!($ty)))
                }
            }
        )+
    };
}

impl_non_struct_destination!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String
);
