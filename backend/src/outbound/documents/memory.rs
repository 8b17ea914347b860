//! In-memory document database.
//!
//! Faithful to the port contract so store logic can be exercised without a
//! server: identifiers are assigned per collection, merges report whether a
//! document matched, and nested collections under different parents are
//! fully independent namespaces.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{DocumentDatabase, DocumentDatabaseError};
use crate::domain::{CollectionPath, JsonObject};

#[derive(Debug, Default)]
struct State {
    collections: HashMap<CollectionPath, BTreeMap<String, JsonObject>>,
    counters: HashMap<CollectionPath, u64>,
}

/// Process-local [`DocumentDatabase`] backed by hash maps.
#[derive(Debug, Default)]
pub struct InMemoryDocumentDatabase {
    state: Mutex<State>,
}

impl InMemoryDocumentDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut State) -> T,
    ) -> Result<T, DocumentDatabaseError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DocumentDatabaseError::backend("state lock poisoned"))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl DocumentDatabase for InMemoryDocumentDatabase {
    async fn insert(
        &self,
        path: &CollectionPath,
        document: &JsonObject,
    ) -> Result<String, DocumentDatabaseError> {
        self.with_state(|state| {
            let counter = state.counters.entry(path.clone()).or_insert(0);
            *counter += 1;
            let id = format!("doc{counter}");
            state
                .collections
                .entry(path.clone())
                .or_default()
                .insert(id.clone(), document.clone());
            id
        })
    }

    async fn find(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<Option<JsonObject>, DocumentDatabaseError> {
        self.with_state(|state| {
            state
                .collections
                .get(path)
                .and_then(|collection| collection.get(id))
                .cloned()
        })
    }

    async fn list(
        &self,
        path: &CollectionPath,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError> {
        self.with_state(|state| {
            state
                .collections
                .get(path)
                .map(|collection| {
                    collection
                        .iter()
                        .map(|(id, fields)| (id.clone(), fields.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn query_eq(
        &self,
        path: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError> {
        self.with_state(|state| {
            state
                .collections
                .get(path)
                .map(|collection| {
                    collection
                        .iter()
                        .filter(|(_, fields)| fields.get(field) == Some(value))
                        .map(|(id, fields)| (id.clone(), fields.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn merge(
        &self,
        path: &CollectionPath,
        id: &str,
        document: &JsonObject,
    ) -> Result<bool, DocumentDatabaseError> {
        self.with_state(|state| {
            let Some(existing) = state
                .collections
                .get_mut(path)
                .and_then(|collection| collection.get_mut(id))
            else {
                return false;
            };
            for (key, value) in document {
                existing.insert(key.clone(), value.clone());
            }
            true
        })
    }

    async fn delete(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<(), DocumentDatabaseError> {
        self.with_state(|state| {
            if let Some(collection) = state.collections.get_mut(path) {
                collection.remove(id);
            }
        })
    }
}
