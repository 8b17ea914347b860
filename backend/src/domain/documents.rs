//! Shared vocabulary for addressing the document store.
//!
//! The document store is hierarchical: top-level collections hold documents,
//! and a document may own named sub-collections addressable only through the
//! parent identifier. [`CollectionPath`] captures both shapes so the client
//! port stays agnostic of which backing store is in play.

use std::fmt;

/// Plain JSON object used as the wire form of every stored document.
///
/// Writes always pass through this structural type, so no behaviourful
/// domain value ever reaches the store.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Address of a collection in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionPath {
    /// A top-level collection.
    Root { name: String },
    /// A named sub-collection owned by a document in a root collection.
    ///
    /// Documents inside are addressable only via `parent_id` plus their own
    /// identifier; identifiers are unique within the sub-collection, never
    /// globally.
    Nested {
        root: String,
        parent_id: String,
        name: String,
    },
}

impl CollectionPath {
    /// Address a top-level collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self::Root { name: name.into() }
    }

    /// Address a named sub-collection under a parent document.
    pub fn nested(
        root: impl Into<String>,
        parent_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Nested {
            root: root.into(),
            parent_id: parent_id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root { name } => f.write_str(name),
            Self::Nested {
                root,
                parent_id,
                name,
            } => write!(f, "{root}/{parent_id}/{name}"),
        }
    }
}
