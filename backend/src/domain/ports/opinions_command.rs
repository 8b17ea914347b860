//! Driving port for opinion and comment mutations.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, DomainResult, Opinion, OpinionDraft};

/// Mutating use cases exposed to inbound adapters.
///
/// Every write re-validates the payload's foreign keys against the
/// relational store before touching the document store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpinionsCommand: Send + Sync {
    /// Create an opinion after validating `user_id` and `team_id`.
    async fn create_opinion(&self, draft: OpinionDraft) -> DomainResult<Opinion>;

    /// Overwrite an opinion's fields; the full draft is re-validated even
    /// when the foreign keys are unchanged.
    async fn update_opinion(&self, id: &str, draft: OpinionDraft) -> DomainResult<Opinion>;

    /// Delete an opinion and return its last stored state.
    async fn delete_opinion(&self, id: &str) -> DomainResult<Opinion>;

    /// Attach a comment to an opinion after validating `user_id` and
    /// `opinion_team_id`. The parent opinion is not checked.
    async fn add_comment(&self, opinion_id: &str, draft: CommentDraft) -> DomainResult<Comment>;

    /// Overwrite a comment's fields under the given opinion.
    async fn update_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
        draft: CommentDraft,
    ) -> DomainResult<Comment>;

    /// Delete a comment, first confirming the parent opinion exists.
    async fn delete_comment(&self, opinion_id: &str, comment_id: &str) -> DomainResult<Comment>;
}
