//! Canned histories and their encoded forms.

use docdelta_core::delta::{AppendContents, SetName};
use docdelta_core::history::TrackedDocument;

/// Encoded form of [`scenario_history`].
pub const SCENARIO_HISTORY_JSON: &str = r#"{"doc":{"name":"new name","contents":"some contents"},"history":[["SetName",{"name":"new name"}],["AppendContents",{"contents":"some contents"}]]}"#;

/// Encoded form of a freshly created aggregate.
pub const EMPTY_HISTORY_JSON: &str = r#"{"doc":{"name":"","contents":""},"history":[]}"#;

/// A fresh document renamed to "new name", then given "some contents".
#[must_use]
pub fn scenario_history() -> TrackedDocument {
    let mut tracked = TrackedDocument::new();
    tracked.apply(SetName::new("new name"));
    tracked.apply(AppendContents::new("some contents"));
    tracked
}
