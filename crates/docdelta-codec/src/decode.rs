//! Decoding of tagged deltas and document histories.
//!
//! Every history entry is read in two steps. The entry is first split into
//! its tag and its still-unparsed payload; the tag alone is decoded, and the
//! variant it names chooses how the payload is deserialized.

use std::io;

use docdelta_core::delta::{AppendContents, Delta, DeltaKind, SetName};
use docdelta_core::document::Document;
use docdelta_core::history::TrackedDocument;
use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Unexpected};
use serde_json::value::RawValue;
use tracing::instrument;

use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::tag::DeltaTag;

/// Delta representations a decoded history can be collected into.
pub trait DecodeDelta: Sized {
    /// Converts a decoded built-in delta into `Self`.
    fn from_kind(kind: DeltaKind) -> Self;
}

impl DecodeDelta for DeltaKind {
    fn from_kind(kind: DeltaKind) -> Self {
        kind
    }
}

impl DecodeDelta for Box<dyn Delta> {
    fn from_kind(kind: DeltaKind) -> Self {
        kind.into()
    }
}

/// A payload that has been located but not yet given a type.
trait PendingPayload {
    fn is_object(&self) -> bool;

    fn decode_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error>;

    /// Like `decode_as`, but only accepts a JSON object. Derived struct
    /// deserializers would otherwise also take an array, field by position.
    fn decode_object<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.is_object() {
            self.decode_as()
        } else {
            Err(de::Error::invalid_type(
                Unexpected::Other("non-object value"),
                &"a JSON object",
            ))
        }
    }
}

impl PendingPayload for RawValue {
    fn is_object(&self) -> bool {
        self.get().trim_start().starts_with('{')
    }

    fn decode_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.get())
    }
}

impl PendingPayload for serde_json::Value {
    fn is_object(&self) -> bool {
        self.is_object()
    }

    fn decode_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self)
    }
}

impl<P: PendingPayload + ?Sized> PendingPayload for Box<P> {
    fn is_object(&self) -> bool {
        (**self).is_object()
    }

    fn decode_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        (**self).decode_as()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireHistory<P> {
    doc: P,
    history: Vec<(String, P)>,
}

fn decode_entry<P: PendingPayload + ?Sized>(
    tag: &str,
    payload: &P,
) -> Result<DeltaKind, CodecError> {
    let tag = tag.parse::<DeltaTag>().inspect_err(|_| {
        tracing::warn!(tag, "unrecognized delta tag");
    })?;
    let kind = match tag {
        DeltaTag::SetName => payload.decode_object::<SetName>().map(DeltaKind::from),
        DeltaTag::AppendContents => payload
            .decode_object::<AppendContents>()
            .map(DeltaKind::from),
    };
    kind.map_err(|source| {
        tracing::warn!(%tag, error = %source, "malformed delta payload");
        CodecError::MalformedPayload {
            expected: tag,
            source,
        }
    })
}

fn assemble<D, P>(
    wire: WireHistory<P>,
    options: &CodecOptions,
) -> Result<TrackedDocument<D>, CodecError>
where
    D: DecodeDelta + Delta,
    P: PendingPayload,
{
    let history = wire
        .history
        .iter()
        .map(|(tag, payload)| decode_entry(tag, payload).map(D::from_kind))
        .collect::<Result<Vec<_>, _>>()?;
    let doc: Document = wire.doc.decode_object()?;
    let tracked = TrackedDocument::restore(doc, history);

    if options.verify_replay {
        let replayed = tracked.replayed_document();
        if replayed != *tracked.document() {
            tracing::warn!(
                version = tracked.version(),
                "recorded document does not match replayed history"
            );
            return Err(CodecError::ReplayMismatch {
                recorded: tracked.document().clone(),
                replayed,
            });
        }
    }

    tracing::debug!(version = tracked.version(), "decoded history");
    Ok(tracked)
}

/// Decodes a single delta from its tag and unparsed payload.
///
/// # Errors
///
/// Returns `CodecError::UnrecognizedTag` if `tag` is not a known tag, or
/// `CodecError::MalformedPayload` if `payload` does not fit the tagged
/// variant.
pub fn decode_delta(tag: &str, payload: &RawValue) -> Result<DeltaKind, CodecError> {
    decode_entry(tag, payload)
}

/// Decodes a document history from JSON text with default options.
///
/// # Errors
///
/// See [`from_str_with`].
pub fn from_str<D: DecodeDelta + Delta>(text: &str) -> Result<TrackedDocument<D>, CodecError> {
    from_str_with(text, &CodecOptions::default())
}

/// Decodes a document history from JSON text.
///
/// # Errors
///
/// Returns `CodecError::Json` if the text is not an encoded history,
/// `CodecError::UnrecognizedTag` or `CodecError::MalformedPayload` for a bad
/// history entry, and `CodecError::ReplayMismatch` if replay verification is
/// enabled and fails.
#[instrument(skip_all, fields(bytes = text.len()))]
pub fn from_str_with<D: DecodeDelta + Delta>(
    text: &str,
    options: &CodecOptions,
) -> Result<TrackedDocument<D>, CodecError> {
    let wire: WireHistory<Box<RawValue>> = serde_json::from_str(text)?;
    assemble(wire, options)
}

/// Decodes a document history from JSON bytes.
///
/// # Errors
///
/// See [`from_str_with`].
#[instrument(skip_all, fields(bytes = bytes.len()))]
pub fn from_slice_with<D: DecodeDelta + Delta>(
    bytes: &[u8],
    options: &CodecOptions,
) -> Result<TrackedDocument<D>, CodecError> {
    let wire: WireHistory<Box<RawValue>> = serde_json::from_slice(bytes)?;
    assemble(wire, options)
}

/// Decodes a document history read from `reader`.
///
/// # Errors
///
/// Returns `CodecError::Io` if reading fails; otherwise see
/// [`from_str_with`].
#[instrument(skip_all)]
pub fn from_reader_with<R: io::Read, D: DecodeDelta + Delta>(
    reader: R,
    options: &CodecOptions,
) -> Result<TrackedDocument<D>, CodecError> {
    let wire: WireHistory<Box<RawValue>> =
        serde_json::from_reader(reader).map_err(CodecError::from_stream)?;
    assemble(wire, options)
}

/// Decodes a document history from an already-parsed JSON value.
///
/// # Errors
///
/// See [`from_str_with`].
#[instrument(skip_all)]
pub fn from_value_with<D: DecodeDelta + Delta>(
    value: serde_json::Value,
    options: &CodecOptions,
) -> Result<TrackedDocument<D>, CodecError> {
    let wire: WireHistory<serde_json::Value> = serde_json::from_value(value)?;
    assemble(wire, options)
}
