//! Port for the external document store client.
//!
//! The domain consumes a deliberately small surface: auto-identifier
//! inserts, existence-signalling reads, equality queries, merge-semantics
//! updates, and deletes, each addressable at a root collection or a named
//! sub-collection via [`CollectionPath`]. Adapters own connection handling
//! and identifier generation.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CollectionPath, JsonObject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document database adapters.
    pub enum DocumentDatabaseError {
        /// The backend is unreachable or rejected the operation.
        Backend { message: String } =>
            "document database operation failed: {message}",
        /// A document could not be converted to or from its wire form.
        Serialization { message: String } =>
            "document serialization failed: {message}",
    }
}

/// Client port for the schemaless document store.
///
/// Every operation is a single round trip. Absence of a document is a
/// distinct result, never an error, so callers can tell "missing" apart
/// from "broken".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentDatabase: Send + Sync {
    /// Append a new document and return the backend-assigned identifier.
    async fn insert(
        &self,
        path: &CollectionPath,
        document: &JsonObject,
    ) -> Result<String, DocumentDatabaseError>;

    /// Fetch a document by identifier. Absence is `Ok(None)`.
    async fn find(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<Option<JsonObject>, DocumentDatabaseError>;

    /// Full scan of a collection. Ordering is backend-defined.
    async fn list(
        &self,
        path: &CollectionPath,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError>;

    /// Equality filter on a single field.
    async fn query_eq(
        &self,
        path: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError>;

    /// Merge fields into an existing document (never a full replace).
    ///
    /// Returns `false` when no document matched the identifier, so callers
    /// can guard against a concurrent delete.
    async fn merge(
        &self,
        path: &CollectionPath,
        id: &str,
        document: &JsonObject,
    ) -> Result<bool, DocumentDatabaseError>;

    /// Delete a document by identifier. Deleting a missing document is not
    /// an error.
    async fn delete(&self, path: &CollectionPath, id: &str)
    -> Result<(), DocumentDatabaseError>;
}
