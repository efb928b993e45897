//! A `Delta` implementor outside the built-in set.

use std::any::Any;

use docdelta_core::delta::Delta;
use docdelta_core::document::Document;

/// Upper-cases the document name. Not a built-in delta, so encoders must
/// reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoutName;

impl Delta for ShoutName {
    fn apply(&self, document: &mut Document) {
        let shouted = document.name().to_uppercase();
        document.set_name(&shouted);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
