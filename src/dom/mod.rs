//! Simulated DOM implementing the platform full-screen API
//!
//! Used to drive hosts outside a browser: every behavior of the platform that
//! hosts depend on (asynchronous confirmation, prefixed members, user exit,
//! refusal) can be reproduced deterministically.

mod document;
mod style;

pub use document::{ApiSupport, CallLog, Document, Element, RequestPolicy};
pub use style::StyleDeclaration;

/// Element identifier, unique within a document
pub type ElementId = u64;

/// Data for element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g., "div", "video")
    pub tag_name: String,
    /// Inline style
    pub style: StyleDeclaration,
}

impl ElementData {
    /// Create a new element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            style: StyleDeclaration::new(),
        }
    }
}
