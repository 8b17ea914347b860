//! Document-backed opinion/comment store.
//!
//! [`DocumentOpinionCommentStore`] implements the persistence half of the
//! core on top of any [`DocumentDatabase`] client. It is deliberately dumb:
//! payloads arrive pre-validated, and the only work here is shaping records
//! into plain documents, echoing assigned identifiers, and capturing
//! pre-delete snapshots. Read-then-write sequences are two independent
//! round trips; nothing here is atomic against concurrent writers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::{
    DocumentDatabase, DocumentDatabaseError, OpinionCommentStore, OpinionCommentStoreError,
};
use crate::domain::{Comment, CommentDraft, CollectionPath, Opinion, OpinionDraft};

/// Root collection holding opinion documents.
const OPINIONS: &str = "team_opinions";
/// Sub-collection name for comments under each opinion.
const COMMENTS: &str = "comments";

/// Opinion/comment store over a document database client.
#[derive(Clone)]
pub struct DocumentOpinionCommentStore<D> {
    database: Arc<D>,
}

impl<D> DocumentOpinionCommentStore<D> {
    /// Create a store over the given document database handle.
    pub fn new(database: Arc<D>) -> Self {
        Self { database }
    }

    fn opinions() -> CollectionPath {
        CollectionPath::root(OPINIONS)
    }

    fn comments(opinion_id: &str) -> CollectionPath {
        CollectionPath::nested(OPINIONS, opinion_id, COMMENTS)
    }
}

fn map_database_error(error: DocumentDatabaseError) -> OpinionCommentStoreError {
    match error {
        DocumentDatabaseError::Backend { message } => OpinionCommentStoreError::backend(message),
        DocumentDatabaseError::Serialization { message } => {
            OpinionCommentStoreError::decode(message)
        }
    }
}

fn decode_error(error: serde_json::Error) -> OpinionCommentStoreError {
    OpinionCommentStoreError::decode(error.to_string())
}

#[async_trait]
impl<D> OpinionCommentStore for DocumentOpinionCommentStore<D>
where
    D: DocumentDatabase,
{
    async fn create_opinion(
        &self,
        draft: &OpinionDraft,
    ) -> Result<Opinion, OpinionCommentStoreError> {
        let document = draft.to_document().map_err(decode_error)?;
        let id = self
            .database
            .insert(&Self::opinions(), &document)
            .await
            .map_err(map_database_error)?;
        Opinion::from_document(id, document).map_err(decode_error)
    }

    async fn get_opinion(&self, id: &str) -> Result<Option<Opinion>, OpinionCommentStoreError> {
        let document = self
            .database
            .find(&Self::opinions(), id)
            .await
            .map_err(map_database_error)?;
        document
            .map(|fields| Opinion::from_document(id, fields))
            .transpose()
            .map_err(decode_error)
    }

    async fn list_opinions(&self) -> Result<Vec<Opinion>, OpinionCommentStoreError> {
        let documents = self
            .database
            .list(&Self::opinions())
            .await
            .map_err(map_database_error)?;
        documents
            .into_iter()
            .map(|(id, fields)| Opinion::from_document(id, fields))
            .collect::<Result<_, _>>()
            .map_err(decode_error)
    }

    async fn list_opinions_by_team(
        &self,
        team_id: Uuid,
    ) -> Result<Vec<Opinion>, OpinionCommentStoreError> {
        let value = Value::String(team_id.to_string());
        let documents = self
            .database
            .query_eq(&Self::opinions(), "team_id", &value)
            .await
            .map_err(map_database_error)?;
        documents
            .into_iter()
            .map(|(id, fields)| Opinion::from_document(id, fields))
            .collect::<Result<_, _>>()
            .map_err(decode_error)
    }

    async fn update_opinion(
        &self,
        id: &str,
        draft: &OpinionDraft,
    ) -> Result<Option<Opinion>, OpinionCommentStoreError> {
        let document = draft.to_document().map_err(decode_error)?;
        let matched = self
            .database
            .merge(&Self::opinions(), id, &document)
            .await
            .map_err(map_database_error)?;
        if !matched {
            return Ok(None);
        }
        // Echo the identifier merged with the payload; no confirming re-read.
        Opinion::from_document(id, document)
            .map(Some)
            .map_err(decode_error)
    }

    async fn delete_opinion(
        &self,
        id: &str,
    ) -> Result<Option<Opinion>, OpinionCommentStoreError> {
        let path = Self::opinions();
        let Some(snapshot) = self
            .database
            .find(&path, id)
            .await
            .map_err(map_database_error)?
        else {
            return Ok(None);
        };
        self.database
            .delete(&path, id)
            .await
            .map_err(map_database_error)?;
        Opinion::from_document(id, snapshot)
            .map(Some)
            .map_err(decode_error)
    }

    async fn add_comment(
        &self,
        opinion_id: &str,
        draft: &CommentDraft,
    ) -> Result<Comment, OpinionCommentStoreError> {
        let document = draft.to_document().map_err(decode_error)?;
        // No parent existence check: sub-collections may be written under an
        // absent parent document.
        let id = self
            .database
            .insert(&Self::comments(opinion_id), &document)
            .await
            .map_err(map_database_error)?;
        Comment::from_document(id, document).map_err(decode_error)
    }

    async fn list_comments(
        &self,
        opinion_id: &str,
    ) -> Result<Vec<Comment>, OpinionCommentStoreError> {
        let documents = self
            .database
            .list(&Self::comments(opinion_id))
            .await
            .map_err(map_database_error)?;
        documents
            .into_iter()
            .map(|(id, fields)| Comment::from_document(id, fields))
            .collect::<Result<_, _>>()
            .map_err(decode_error)
    }

    async fn get_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, OpinionCommentStoreError> {
        let document = self
            .database
            .find(&Self::comments(opinion_id), comment_id)
            .await
            .map_err(map_database_error)?;
        document
            .map(|fields| Comment::from_document(comment_id, fields))
            .transpose()
            .map_err(decode_error)
    }

    async fn update_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
        draft: &CommentDraft,
    ) -> Result<Option<Comment>, OpinionCommentStoreError> {
        let document = draft.to_document().map_err(decode_error)?;
        let matched = self
            .database
            .merge(&Self::comments(opinion_id), comment_id, &document)
            .await
            .map_err(map_database_error)?;
        if !matched {
            return Ok(None);
        }
        Comment::from_document(comment_id, document)
            .map(Some)
            .map_err(decode_error)
    }

    async fn delete_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, OpinionCommentStoreError> {
        let path = Self::comments(opinion_id);
        let Some(snapshot) = self
            .database
            .find(&path, comment_id)
            .await
            .map_err(map_database_error)?
        else {
            return Ok(None);
        };
        self.database
            .delete(&path, comment_id)
            .await
            .map_err(map_database_error)?;
        Comment::from_document(comment_id, snapshot)
            .map(Some)
            .map_err(decode_error)
    }
}
