//! Wire tags identifying delta variants.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CodecError;

/// Discriminant written in front of every encoded delta payload.
///
/// The tag belongs to the wire format only; it is not part of a delta's
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaTag {
    /// Payload is a `SetName`.
    SetName,
    /// Payload is an `AppendContents`.
    AppendContents,
}

impl DeltaTag {
    /// Every known tag.
    pub const ALL: [DeltaTag; 2] = [DeltaTag::SetName, DeltaTag::AppendContents];

    /// Returns the tag's wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeltaTag::SetName => "SetName",
            DeltaTag::AppendContents => "AppendContents",
        }
    }
}

impl fmt::Display for DeltaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaTag {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeltaTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| CodecError::UnrecognizedTag(s.to_owned()))
    }
}

impl Serialize for DeltaTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
