//! Codec error types.

use docdelta_core::document::Document;
use thiserror::Error;

use crate::tag::DeltaTag;

/// Errors produced while encoding or decoding a document history.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A boxed delta is not one of the built-in variants.
    #[error("cannot encode delta of unknown variant `{type_name}`")]
    UnknownVariant {
        /// Rust type name of the offending delta.
        type_name: &'static str,
    },

    /// A history entry carried a tag outside the known set.
    #[error("unrecognized delta tag {0:?}")]
    UnrecognizedTag(String),

    /// The payload did not have the shape the tag calls for.
    #[error("malformed {expected} payload: {source}")]
    MalformedPayload {
        /// The variant named by the entry's tag.
        expected: DeltaTag,
        /// The underlying deserialization failure.
        source: serde_json::Error,
    },

    /// The recorded document differs from the one its history produces.
    #[error("recorded document does not match replayed history")]
    ReplayMismatch {
        /// The document as found on the wire.
        recorded: Document,
        /// The document rebuilt from the history.
        replayed: Document,
    },

    /// Invalid JSON, or JSON that is not an encoded history.
    #[error("invalid encoded history: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the encoded form failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Classifies a `serde_json` error from a reader or writer, keeping I/O
    /// failures apart from format failures.
    pub(crate) fn from_stream(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Json(err)
        }
    }
}
