//! MongoDB-backed document database.
//!
//! Collection mapping: a root path maps straight onto a MongoDB collection;
//! a nested path maps onto a sibling collection named `{root}.{name}` whose
//! documents carry a `_parent` discriminator holding the parent identifier.
//! Every nested read and write filters on `_parent`, which preserves the
//! port's per-parent identifier scoping even though MongoDB itself has no
//! sub-collections.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use crate::domain::ports::{DocumentDatabase, DocumentDatabaseError};
use crate::domain::{CollectionPath, JsonObject};

use futures_util::TryStreamExt;

/// Reserved field linking a nested document to its parent.
const PARENT_FIELD: &str = "_parent";

/// [`DocumentDatabase`] implementation over a MongoDB database handle.
#[derive(Debug, Clone)]
pub struct MongoDocumentDatabase {
    database: Database,
}

impl MongoDocumentDatabase {
    /// Wrap an already-connected database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to a MongoDB deployment and select a database.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, DocumentDatabaseError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|err| DocumentDatabaseError::backend(err.to_string()))?;
        Ok(Self::new(client.database(database)))
    }

    fn collection(&self, path: &CollectionPath) -> Collection<Document> {
        match path {
            CollectionPath::Root { name } => self.database.collection(name),
            CollectionPath::Nested { root, name, .. } => {
                self.database.collection(&format!("{root}.{name}"))
            }
        }
    }

    fn scope_filter(path: &CollectionPath) -> Document {
        match path {
            CollectionPath::Root { .. } => doc! {},
            CollectionPath::Nested { parent_id, .. } => doc! { PARENT_FIELD: parent_id },
        }
    }

    fn id_filter(path: &CollectionPath, id: ObjectId) -> Document {
        let mut filter = Self::scope_filter(path);
        filter.insert("_id", id);
        filter
    }

    fn encode(
        path: &CollectionPath,
        document: &JsonObject,
    ) -> Result<Document, DocumentDatabaseError> {
        let mut encoded = bson::to_document(document)
            .map_err(|err| DocumentDatabaseError::serialization(err.to_string()))?;
        if let CollectionPath::Nested { parent_id, .. } = path {
            encoded.insert(PARENT_FIELD, parent_id.as_str());
        }
        Ok(encoded)
    }

    fn decode(mut document: Document) -> Result<(String, JsonObject), DocumentDatabaseError> {
        let id = match document.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => {
                return Err(DocumentDatabaseError::serialization(
                    "stored document is missing its _id",
                ));
            }
        };
        document.remove(PARENT_FIELD);
        let value = serde_json::to_value(document)
            .map_err(|err| DocumentDatabaseError::serialization(err.to_string()))?;
        match value {
            Value::Object(fields) => Ok((id, fields)),
            _ => Err(DocumentDatabaseError::serialization(
                "stored document did not decode to an object",
            )),
        }
    }
}

fn backend_error(err: mongodb::error::Error) -> DocumentDatabaseError {
    DocumentDatabaseError::backend(err.to_string())
}

#[async_trait]
impl DocumentDatabase for MongoDocumentDatabase {
    async fn insert(
        &self,
        path: &CollectionPath,
        document: &JsonObject,
    ) -> Result<String, DocumentDatabaseError> {
        let encoded = Self::encode(path, document)?;
        let result = self
            .collection(path)
            .insert_one(encoded)
            .await
            .map_err(backend_error)?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            other => Err(DocumentDatabaseError::serialization(format!(
                "unexpected inserted identifier: {other}"
            ))),
        }
    }

    async fn find(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<Option<JsonObject>, DocumentDatabaseError> {
        // An unparsable identifier cannot match any stored document.
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let found = self
            .collection(path)
            .find_one(Self::id_filter(path, oid))
            .await
            .map_err(backend_error)?;
        found
            .map(|document| Self::decode(document).map(|(_, fields)| fields))
            .transpose()
    }

    async fn list(
        &self,
        path: &CollectionPath,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError> {
        let documents: Vec<Document> = self
            .collection(path)
            .find(Self::scope_filter(path))
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        documents.into_iter().map(Self::decode).collect()
    }

    async fn query_eq(
        &self,
        path: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, JsonObject)>, DocumentDatabaseError> {
        let needle = bson::to_bson(value)
            .map_err(|err| DocumentDatabaseError::serialization(err.to_string()))?;
        let mut filter = Self::scope_filter(path);
        filter.insert(field, needle);
        let documents: Vec<Document> = self
            .collection(path)
            .find(filter)
            .await
            .map_err(backend_error)?
            .try_collect()
            .await
            .map_err(backend_error)?;
        documents.into_iter().map(Self::decode).collect()
    }

    async fn merge(
        &self,
        path: &CollectionPath,
        id: &str,
        document: &JsonObject,
    ) -> Result<bool, DocumentDatabaseError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let set = bson::to_document(document)
            .map_err(|err| DocumentDatabaseError::serialization(err.to_string()))?;
        let result = self
            .collection(path)
            .update_one(Self::id_filter(path, oid), doc! { "$set": set })
            .await
            .map_err(backend_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(
        &self,
        path: &CollectionPath,
        id: &str,
    ) -> Result<(), DocumentDatabaseError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(());
        };
        self.collection(path)
            .delete_one(Self::id_filter(path, oid))
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn nested_writes_carry_the_parent_discriminator() {
        let path = CollectionPath::nested("team_opinions", "o1", "comments");
        let encoded =
            MongoDocumentDatabase::encode(&path, &fields(json!({ "text": "hi" })))
                .expect("encode");
        assert_eq!(encoded.get_str(PARENT_FIELD).expect("parent"), "o1");
    }

    #[test]
    fn root_writes_do_not_carry_the_discriminator() {
        let path = CollectionPath::root("team_opinions");
        let encoded = MongoDocumentDatabase::encode(&path, &fields(json!({ "n": 1 })))
            .expect("encode");
        assert!(!encoded.contains_key(PARENT_FIELD));
    }

    #[test]
    fn decode_strips_storage_fields_and_extracts_the_identifier() {
        let oid = ObjectId::new();
        let stored = doc! { "_id": oid, PARENT_FIELD: "o1", "text": "hi" };
        let (id, fields) = MongoDocumentDatabase::decode(stored).expect("decode");
        assert_eq!(id, oid.to_hex());
        assert!(!fields.contains_key("_id"));
        assert!(!fields.contains_key(PARENT_FIELD));
        assert_eq!(fields["text"], "hi");
    }

    #[test]
    fn decode_requires_an_identifier() {
        let err = MongoDocumentDatabase::decode(doc! { "text": "hi" })
            .expect_err("missing _id rejected");
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn nested_paths_map_onto_sibling_collections() {
        let filter = MongoDocumentDatabase::scope_filter(&CollectionPath::nested(
            "team_opinions",
            "o1",
            "comments",
        ));
        assert_eq!(filter.get_str(PARENT_FIELD).expect("parent"), "o1");
    }
}
