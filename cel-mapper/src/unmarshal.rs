//! Mapping records into event structs.

use crate::error::{Error, FieldError};
use crate::map::{Destination, Event, Field, Kind, TIMESTAMP_TYPE_NAME};
use crate::tag::Tag;
use crate::time::parse_asterisk_timestamp;

/// Unmarshal `record` into the event struct behind `v`.
///
/// `v` must be a non-nil pointer to an [`Event`] struct, i.e. `&mut T` or
/// `Some(&mut T)`. Anything else is rejected before any field is visited.
///
/// Fields are visited in declaration order. Fields without a directive and
/// fields that aren't settable are skipped. Without `json`, the supported field
/// types are `String` (assigned verbatim) and `DateTime<Utc>` (parsed with
/// [`parse_asterisk_timestamp`]); everything else fails. With `json`,
/// the record value is decoded with `serde_json`, and `noerror` makes decoding
/// failures silent.
///
/// The first failing field aborts the mapping. Fields mapped before it keep
/// their new values.
pub fn unmarshal_event<S, D>(record: &[S], mut v: D) -> Result<(), Error>
where
    S: AsRef<str>,
    D: Destination,
{
    let fields = v.resolve()?;
    log::debug!(
        "mapping {} record values into {} struct fields",
        record.len(),
        fields.len()
    );

    for field in fields {
        let name = field.name();
        map_field(record, field).map_err(|e| Error::Field {
            field: name,
            source: e,
        })?;
    }

    Ok(())
}

/// Create a new `T` and fill it from `record`.
///
/// Fields of `T` that `record` doesn't touch keep their default values.
pub fn from_record<T, S>(record: &[S]) -> Result<T, Error>
where
    T: Event + Default,
    S: AsRef<str>,
{
    let mut event = T::default();
    unmarshal_event(record, &mut event)?;
    Ok(event)
}

fn map_field<S: AsRef<str>>(record: &[S], field: Field<'_>) -> Result<(), FieldError> {
    let name = field.name();
    let tag = field.tag();

    let slot = match field.into_slot() {
        Some(slot) => slot,
        None => {
            log::trace!("skipping unsettable field {}", name);
            return Ok(());
        }
    };

    let tag = match Tag::parse(tag)? {
        Some(tag) => tag,
        None => {
            log::trace!("skipping untagged field {}", name);
            return Ok(());
        }
    };

    let value: &str = match record.get(tag.index) {
        Some(value) => value.as_ref(),
        None => {
            return Err(FieldError::IndexOutOfRange {
                index: tag.index,
                len: record.len(),
            })
        }
    };

    if tag.json {
        return match slot.decode_json(value) {
            Ok(()) => Ok(()),
            Err(e) if !tag.propagates_decode_errors() => {
                log::trace!("ignoring JSON error for field {}: {}", name, e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    let type_name = slot.type_name();
    match slot.kind() {
        Kind::Text(text) => value.clone_into(text),
        Kind::Timestamp(ts) => {
            *ts = parse_asterisk_timestamp(value).map_err(|e| FieldError::Conversion {
                value: value.into(),
                ty: TIMESTAMP_TYPE_NAME,
                source: e,
            })?;
        }
        Kind::Other => return Err(FieldError::Unsupported(type_name)),
    }

    log::trace!("mapped record value {} into field {}", tag.index, name);
    Ok(())
}
