//! Port between the opinion/comment service and its persistence layer.
//!
//! The store performs raw document operations on pre-validated payloads and
//! carries no business validation of its own. The service never touches the
//! document database directly, and the store never consults the relational
//! store; the two layers are mocked and tested independently.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentDraft, Opinion, OpinionDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by opinion/comment store implementations.
    pub enum OpinionCommentStoreError {
        /// The document backend failed or was unreachable.
        Backend { message: String } =>
            "opinion store operation failed: {message}",
        /// A record could not be encoded for, or decoded from, the store.
        Decode { message: String } =>
            "opinion store record was malformed: {message}",
    }
}

/// Raw persistence operations for opinions and their comment sub-collection.
///
/// Delete operations pre-read the document to capture its final state and
/// return `Ok(None)` when nothing existed, so callers receive a distinct
/// not-found signal rather than an empty snapshot. Update operations return
/// `Ok(None)` when no document matched, guarding against a concurrent
/// delete between lookup and write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpinionCommentStore: Send + Sync {
    /// Append a new opinion document; echoes the assigned identifier merged
    /// with the payload.
    async fn create_opinion(
        &self,
        draft: &OpinionDraft,
    ) -> Result<Opinion, OpinionCommentStoreError>;

    /// Fetch an opinion by identifier.
    async fn get_opinion(&self, id: &str) -> Result<Option<Opinion>, OpinionCommentStoreError>;

    /// Full scan of all opinions; ordering is whatever the store returns.
    async fn list_opinions(&self) -> Result<Vec<Opinion>, OpinionCommentStoreError>;

    /// Equality filter on the `team_id` field.
    async fn list_opinions_by_team(
        &self,
        team_id: Uuid,
    ) -> Result<Vec<Opinion>, OpinionCommentStoreError>;

    /// Merge the payload into the opinion document without a confirming
    /// re-read; `Ok(None)` when no document matched.
    async fn update_opinion(
        &self,
        id: &str,
        draft: &OpinionDraft,
    ) -> Result<Option<Opinion>, OpinionCommentStoreError>;

    /// Delete an opinion, returning its pre-delete snapshot.
    async fn delete_opinion(&self, id: &str)
    -> Result<Option<Opinion>, OpinionCommentStoreError>;

    /// Append a comment under the given opinion identifier.
    ///
    /// Deliberately does not verify the parent opinion exists; a hierarchical
    /// schemaless store accepts sub-collection writes under absent parents,
    /// and the one caller that cares (comment deletion) checks explicitly.
    async fn add_comment(
        &self,
        opinion_id: &str,
        draft: &CommentDraft,
    ) -> Result<Comment, OpinionCommentStoreError>;

    /// List all comments under an opinion. An empty list is success.
    async fn list_comments(
        &self,
        opinion_id: &str,
    ) -> Result<Vec<Comment>, OpinionCommentStoreError>;

    /// Fetch one comment; always requires both identifiers.
    async fn get_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, OpinionCommentStoreError>;

    /// Merge the payload into a comment; `Ok(None)` when no match.
    async fn update_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
        draft: &CommentDraft,
    ) -> Result<Option<Comment>, OpinionCommentStoreError>;

    /// Delete a comment, returning its pre-delete snapshot.
    async fn delete_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, OpinionCommentStoreError>;
}
