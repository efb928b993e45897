//! Delta abstractions and the built-in delta variants.

use std::any::Any;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// An atomic, self-contained change to a [`Document`].
///
/// Implementors are immutable once constructed. Applying a delta never
/// fails.
pub trait Delta: Any + Debug + Send + Sync {
    /// Mutates `document` according to this delta.
    fn apply(&self, document: &mut Document);

    /// Returns `self` as `Any` so encoders can recover the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Returns the Rust type name of the concrete delta (diagnostics only).
    fn delta_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<D: Delta + ?Sized> Delta for Box<D> {
    fn apply(&self, document: &mut Document) {
        (**self).apply(document);
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn delta_name(&self) -> &'static str {
        (**self).delta_name()
    }
}

/// Replaces the document name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetName {
    name: String,
}

impl SetName {
    /// Creates a delta that renames the document to `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The new document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Delta for SetName {
    fn apply(&self, document: &mut Document) {
        document.set_name(&self.name);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Appends text to the document contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppendContents {
    contents: String,
}

impl AppendContents {
    /// Creates a delta that appends `contents` to the document.
    #[must_use]
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// The appended text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Delta for AppendContents {
    fn apply(&self, document: &mut Document) {
        document.push_contents(&self.contents);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The closed set of built-in deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaKind {
    /// The document was renamed.
    SetName(SetName),
    /// Text was appended to the document.
    AppendContents(AppendContents),
}

impl Delta for DeltaKind {
    fn apply(&self, document: &mut Document) {
        match self {
            DeltaKind::SetName(delta) => delta.apply(document),
            DeltaKind::AppendContents(delta) => delta.apply(document),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<SetName> for DeltaKind {
    fn from(delta: SetName) -> Self {
        Self::SetName(delta)
    }
}

impl From<AppendContents> for DeltaKind {
    fn from(delta: AppendContents) -> Self {
        Self::AppendContents(delta)
    }
}

impl From<SetName> for Box<dyn Delta> {
    fn from(delta: SetName) -> Self {
        Box::new(delta)
    }
}

impl From<AppendContents> for Box<dyn Delta> {
    fn from(delta: AppendContents) -> Self {
        Box::new(delta)
    }
}

// Boxes the variant, not the enum, so a downcast finds the concrete type.
impl From<DeltaKind> for Box<dyn Delta> {
    fn from(delta: DeltaKind) -> Self {
        match delta {
            DeltaKind::SetName(delta) => Box::new(delta),
            DeltaKind::AppendContents(delta) => Box::new(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_replaces_name() {
        // Arrange
        let mut doc = Document::new();
        SetName::new("old").apply(&mut doc);

        // Act
        SetName::new("new name").apply(&mut doc);

        // Assert
        assert_eq!(doc.name(), "new name");
        assert_eq!(doc.contents(), "");
    }

    #[test]
    fn test_append_contents_concatenates() {
        // Arrange
        let mut doc = Document::new();

        // Act
        AppendContents::new("some ").apply(&mut doc);
        AppendContents::new("contents").apply(&mut doc);

        // Assert
        assert_eq!(doc.contents(), "some contents");
        assert_eq!(doc.name(), "");
    }

    #[test]
    fn test_delta_kind_dispatches_to_variant() {
        // Arrange
        let mut doc = Document::new();
        let deltas = [
            DeltaKind::from(SetName::new("title")),
            DeltaKind::from(AppendContents::new("body")),
        ];

        // Act
        for delta in &deltas {
            delta.apply(&mut doc);
        }

        // Assert
        assert_eq!(doc.name(), "title");
        assert_eq!(doc.contents(), "body");
    }

    #[test]
    fn test_boxed_delta_forwards_apply_and_as_any() {
        // Arrange
        let boxed: Box<dyn Delta> = SetName::new("boxed").into();
        let mut doc = Document::new();

        // Act
        boxed.apply(&mut doc);

        // Assert
        assert_eq!(doc.name(), "boxed");
        assert_eq!(
            boxed.as_any().downcast_ref::<SetName>(),
            Some(&SetName::new("boxed"))
        );
        assert!(boxed.delta_name().ends_with("SetName"));
    }

    #[test]
    fn test_delta_kind_into_box_unwraps_variant() {
        // Arrange
        let kind = DeltaKind::from(AppendContents::new("text"));

        // Act
        let boxed: Box<dyn Delta> = kind.into();

        // Assert
        assert!(boxed.as_any().downcast_ref::<DeltaKind>().is_none());
        assert_eq!(
            boxed.as_any().downcast_ref::<AppendContents>(),
            Some(&AppendContents::new("text"))
        );
    }
}
