//! Docdelta Core: document model and delta history.
//!
//! A [`document::Document`] is only ever changed by applying a
//! [`delta::Delta`]. A [`history::TrackedDocument`] applies deltas and keeps
//! them, in order, so the document can be rebuilt by replay. This crate
//! contains no wire-format code; see `docdelta-codec`.

pub mod delta;
pub mod document;
pub mod history;
