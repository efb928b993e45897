//! The document model.

use serde::{Deserialize, Serialize};

/// A named document whose contents only grow.
///
/// Documents are changed by applying a [`Delta`](crate::delta::Delta); the
/// setters below exist for delta implementations and should not be called
/// from anywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    name: String,
    contents: String,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the document contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replaces the document name.
    pub fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }

    /// Appends to the document contents.
    pub fn push_contents(&mut self, contents: &str) {
        self.contents.push_str(contents);
    }
}
