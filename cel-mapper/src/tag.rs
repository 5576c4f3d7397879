//! Parsing for `#[cel("...")]` field directives.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// The directive couldn't be parsed, because its index isn't an integer.
#[derive(Debug, Error)]
#[error("bad tag value {tag:?}: {source}")]
pub struct TagError {
    tag: String,
    #[source]
    source: ParseIntError,
}

impl TagError {
    /// Returns the raw directive that failed to parse.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// A parsed field directive, i.e. `index[,json][,noerror]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    /// The index of the record field that feeds this struct field.
    pub index: usize,
    /// Whether the record field is decoded as JSON instead of converted directly.
    pub json: bool,
    /// Whether JSON decoding failures are swallowed. Only meaningful with `json`.
    pub noerror: bool,
}

impl Tag {
    /// Parse a field directive.
    ///
    /// Returns `Ok(None)` for an empty directive, which marks an unmapped field.
    pub fn parse(tag: &str) -> Result<Option<Self>, TagError> {
        if tag.is_empty() {
            return Ok(None);
        }

        tag.parse().map(Some)
    }

    /// Returns whether a JSON decoding failure for this field should be propagated.
    pub fn propagates_decode_errors(&self) -> bool {
        !(self.json && self.noerror)
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split(',');

        // Unwrap safety: `split` always yields at least one (possibly empty) part.
        #[allow(clippy::unwrap_used)]
        let index = parts.next().unwrap();
        let index = index.parse::<usize>().map_err(|e| TagError {
            tag: value.into(),
            source: e,
        })?;

        let mut parsed = Tag {
            index: index,
            ..Default::default()
        };

        // Unknown modifiers are ignored, not rejected.
        for modifier in parts {
            match modifier {
                "json" => parsed.json = true,
                "noerror" => parsed.noerror = true,
                _ => log::trace!("ignoring unknown modifier {:?} in tag {:?}", modifier, value),
            }
        }

        Ok(parsed)
    }
}
