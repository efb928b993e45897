//! History-tracking aggregate.

use crate::delta::{Delta, DeltaKind};
use crate::document::Document;

/// A document together with the ordered log of deltas applied to it.
///
/// Replaying `history` against a fresh [`Document`] reproduces `document`,
/// unless the value was assembled with [`TrackedDocument::restore`] from
/// inconsistent parts.
///
/// `D` defaults to the closed [`DeltaKind`] set; use `Box<dyn Delta>` when
/// deltas defined outside this crate must be tracked too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedDocument<D = DeltaKind> {
    document: Document,
    history: Vec<D>,
}

impl<D> Default for TrackedDocument<D> {
    fn default() -> Self {
        Self {
            document: Document::new(),
            history: Vec::new(),
        }
    }
}

impl<D> TrackedDocument<D> {
    /// Creates an aggregate with an empty document and no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles an aggregate from parts without replaying.
    ///
    /// The caller is responsible for `history` matching `document`; see
    /// [`TrackedDocument::replayed_document`] for a check.
    #[must_use]
    pub fn restore(document: Document, history: Vec<D>) -> Self {
        Self { document, history }
    }

    /// Returns the current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the applied deltas in application order.
    #[must_use]
    pub fn history(&self) -> &[D] {
        &self.history
    }

    /// Returns the number of deltas applied.
    #[must_use]
    pub fn version(&self) -> usize {
        self.history.len()
    }

    /// Splits the aggregate into its document and history.
    #[must_use]
    pub fn into_parts(self) -> (Document, Vec<D>) {
        (self.document, self.history)
    }
}

impl<D: Delta> TrackedDocument<D> {
    /// Rebuilds an aggregate by applying `history` to a fresh document.
    #[must_use]
    pub fn replay(history: Vec<D>) -> Self {
        let mut document = Document::new();
        for delta in &history {
            delta.apply(&mut document);
        }
        Self { document, history }
    }

    /// Applies `delta` to the document and records it.
    pub fn apply(&mut self, delta: impl Into<D>) {
        let delta = delta.into();
        delta.apply(&mut self.document);
        tracing::debug!(
            version = self.history.len() + 1,
            delta = delta.delta_name(),
            "applied delta"
        );
        self.history.push(delta);
    }

    /// Replays the recorded history against a fresh document.
    #[must_use]
    pub fn replayed_document(&self) -> Document {
        let mut document = Document::new();
        for delta in &self.history {
            delta.apply(&mut document);
        }
        document
    }
}
