//! Encoding of deltas and document histories.

use std::io;

use docdelta_core::delta::{AppendContents, Delta, DeltaKind, SetName};
use docdelta_core::document::Document;
use docdelta_core::history::TrackedDocument;
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use tracing::instrument;

use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::tag::DeltaTag;

/// A borrowed delta resolved to its concrete variant.
///
/// Serializes as the two-element array `[tag, payload]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedRef<'a> {
    /// A `SetName` payload.
    SetName(&'a SetName),
    /// An `AppendContents` payload.
    AppendContents(&'a AppendContents),
}

impl TaggedRef<'_> {
    /// Returns the wire tag for this payload.
    #[must_use]
    pub fn tag(&self) -> DeltaTag {
        match self {
            TaggedRef::SetName(_) => DeltaTag::SetName,
            TaggedRef::AppendContents(_) => DeltaTag::AppendContents,
        }
    }
}

impl<'a> From<&'a DeltaKind> for TaggedRef<'a> {
    fn from(kind: &'a DeltaKind) -> Self {
        match kind {
            DeltaKind::SetName(delta) => TaggedRef::SetName(delta),
            DeltaKind::AppendContents(delta) => TaggedRef::AppendContents(delta),
        }
    }
}

impl Serialize for TaggedRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_tuple(2)?;
        entry.serialize_element(&self.tag())?;
        match self {
            TaggedRef::SetName(delta) => entry.serialize_element(delta)?,
            TaggedRef::AppendContents(delta) => entry.serialize_element(delta)?,
        }
        entry.end()
    }
}

/// Deltas that can be resolved to a tagged wire entry.
pub trait EncodeDelta {
    /// Resolves `self` to its concrete variant.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnknownVariant` if the concrete type is not a
    /// built-in delta.
    fn tagged(&self) -> Result<TaggedRef<'_>, CodecError>;
}

impl EncodeDelta for DeltaKind {
    fn tagged(&self) -> Result<TaggedRef<'_>, CodecError> {
        Ok(TaggedRef::from(self))
    }
}

impl EncodeDelta for dyn Delta {
    fn tagged(&self) -> Result<TaggedRef<'_>, CodecError> {
        let any = self.as_any();
        if let Some(delta) = any.downcast_ref::<SetName>() {
            return Ok(TaggedRef::SetName(delta));
        }
        if let Some(delta) = any.downcast_ref::<AppendContents>() {
            return Ok(TaggedRef::AppendContents(delta));
        }
        if let Some(kind) = any.downcast_ref::<DeltaKind>() {
            return Ok(TaggedRef::from(kind));
        }
        let type_name = self.delta_name();
        tracing::warn!(delta = type_name, "cannot encode delta of unknown variant");
        Err(CodecError::UnknownVariant { type_name })
    }
}

impl EncodeDelta for Box<dyn Delta> {
    fn tagged(&self) -> Result<TaggedRef<'_>, CodecError> {
        (**self).tagged()
    }
}

#[derive(Serialize)]
struct WireHistory<'a> {
    doc: &'a Document,
    history: Vec<TaggedRef<'a>>,
}

impl<'a> WireHistory<'a> {
    /// Resolves every entry up front so nothing is written for a history
    /// that cannot be encoded.
    fn resolve<D: EncodeDelta>(tracked: &'a TrackedDocument<D>) -> Result<Self, CodecError> {
        let history = tracked
            .history()
            .iter()
            .map(EncodeDelta::tagged)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            doc: tracked.document(),
            history,
        })
    }
}

/// Encodes a single delta as a `[tag, payload]` JSON value.
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if the delta is not a built-in
/// variant.
pub fn encode_delta<D: EncodeDelta + ?Sized>(
    delta: &D,
) -> Result<serde_json::Value, CodecError> {
    Ok(serde_json::to_value(delta.tagged()?)?)
}

/// Encodes a document history as a JSON value.
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if any delta in the history is not
/// a built-in variant.
#[instrument(skip_all, fields(version = tracked.version()))]
pub fn to_value<D: EncodeDelta>(
    tracked: &TrackedDocument<D>,
) -> Result<serde_json::Value, CodecError> {
    let wire = WireHistory::resolve(tracked)?;
    Ok(serde_json::to_value(wire)?)
}

/// Encodes a document history as compact JSON text.
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if any delta in the history is not
/// a built-in variant.
pub fn to_string<D: EncodeDelta>(tracked: &TrackedDocument<D>) -> Result<String, CodecError> {
    to_string_with(tracked, &CodecOptions::default())
}

/// Encodes a document history as JSON text, honouring `options.pretty`.
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if any delta in the history is not
/// a built-in variant.
#[instrument(skip_all, fields(version = tracked.version(), pretty = options.pretty))]
pub fn to_string_with<D: EncodeDelta>(
    tracked: &TrackedDocument<D>,
    options: &CodecOptions,
) -> Result<String, CodecError> {
    let wire = WireHistory::resolve(tracked)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&wire)?
    } else {
        serde_json::to_string(&wire)?
    };
    tracing::debug!(bytes = text.len(), "encoded history");
    Ok(text)
}

/// Writes a document history as JSON to `writer`.
///
/// # Errors
///
/// Returns `CodecError::UnknownVariant` if any delta is not a built-in
/// variant (nothing is written in that case), or `CodecError::Io` if the
/// writer fails.
#[instrument(skip_all, fields(version = tracked.version(), pretty = options.pretty))]
pub fn to_writer_with<W: io::Write, D: EncodeDelta>(
    writer: W,
    tracked: &TrackedDocument<D>,
    options: &CodecOptions,
) -> Result<(), CodecError> {
    let wire = WireHistory::resolve(tracked)?;
    if options.pretty {
        serde_json::to_writer_pretty(writer, &wire).map_err(CodecError::from_stream)
    } else {
        serde_json::to_writer(writer, &wire).map_err(CodecError::from_stream)
    }
}

#[cfg(test)]
mod tests {
    use docdelta_test_support::{ShoutName, scenario_history};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_scenario_history() {
        // Arrange
        let tracked = scenario_history();

        // Act
        let value = to_value(&tracked).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "doc": {"name": "new name", "contents": "some contents"},
                "history": [
                    ["SetName", {"name": "new name"}],
                    ["AppendContents", {"contents": "some contents"}],
                ],
            })
        );
    }

    #[test]
    fn test_encode_empty_history() {
        // Arrange
        let tracked: TrackedDocument = TrackedDocument::new();

        // Act
        let text = to_string(&tracked).unwrap();

        // Assert
        assert_eq!(text, r#"{"doc":{"name":"","contents":""},"history":[]}"#);
    }

    #[test]
    fn test_encode_delta_writes_tag_then_payload() {
        // Act
        let value = encode_delta(&DeltaKind::from(AppendContents::new("x"))).unwrap();

        // Assert
        assert_eq!(value, json!(["AppendContents", {"contents": "x"}]));
    }

    #[test]
    fn test_boxed_deltas_are_recovered_by_downcast() {
        // Arrange
        let set_name: Box<dyn Delta> = Box::new(SetName::new("a"));
        let wrapped_kind: Box<dyn Delta> = Box::new(DeltaKind::from(AppendContents::new("b")));

        // Act
        let first = set_name.tagged().unwrap();
        let second = wrapped_kind.tagged().unwrap();

        // Assert
        assert_eq!(first, TaggedRef::SetName(&SetName::new("a")));
        assert_eq!(second.tag(), DeltaTag::AppendContents);
    }

    #[test]
    fn test_unknown_boxed_delta_is_a_typed_error() {
        // Arrange
        let mut tracked: TrackedDocument<Box<dyn Delta>> = TrackedDocument::new();
        tracked.apply(SetName::new("quiet"));
        tracked.apply(Box::new(ShoutName) as Box<dyn Delta>);

        // Act
        let result = to_string(&tracked);

        // Assert
        match result {
            Err(CodecError::UnknownVariant { type_name }) => {
                assert!(type_name.ends_with("ShoutName"));
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_variant_writes_nothing() {
        // Arrange
        let mut tracked: TrackedDocument<Box<dyn Delta>> = TrackedDocument::new();
        tracked.apply(Box::new(ShoutName) as Box<dyn Delta>);
        let mut out = Vec::new();

        // Act
        let result = to_writer_with(&mut out, &tracked, &CodecOptions::default());

        // Assert
        assert!(matches!(result, Err(CodecError::UnknownVariant { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_pretty_output_is_indented() {
        // Arrange
        let tracked = scenario_history();
        let options = CodecOptions::default().with_pretty(true);

        // Act
        let text = to_string_with(&tracked, &options).unwrap();

        // Assert
        assert!(text.contains("\n  \"history\": ["));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            to_value(&tracked).unwrap()
        );
    }
}
