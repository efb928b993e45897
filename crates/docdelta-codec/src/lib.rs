//! Docdelta Codec: tagged JSON encoding of document histories.
//!
//! A [`TrackedDocument`](docdelta_core::history::TrackedDocument) is written
//! as `{"doc": {..}, "history": [[tag, payload], ..]}`. Each history entry
//! pairs a [`tag::DeltaTag`] with the delta's own fields. Decoding reads the
//! tag first and lets it pick the payload type.

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod tag;

pub use decode::{
    DecodeDelta, decode_delta, from_reader_with, from_slice_with, from_str, from_str_with,
    from_value_with,
};
pub use encode::{
    EncodeDelta, TaggedRef, encode_delta, to_string, to_string_with, to_value, to_writer_with,
};
pub use error::CodecError;
pub use options::CodecOptions;
pub use tag::DeltaTag;
