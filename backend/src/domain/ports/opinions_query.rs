//! Driving port for opinion and comment reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, DomainResult, Opinion};

/// Read-only use cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpinionsQuery: Send + Sync {
    /// Fetch one opinion or NotFound.
    async fn get_opinion(&self, id: &str) -> DomainResult<Opinion>;

    /// List every opinion; ordering is store-defined.
    async fn list_opinions(&self) -> DomainResult<Vec<Opinion>>;

    /// List opinions recorded against a single team.
    async fn list_opinions_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Opinion>>;

    /// List the comments under an opinion. Zero comments is success, not
    /// NotFound; callers that need to tell "no comments" from "no opinion"
    /// should fetch the opinion explicitly.
    async fn list_comments(&self, opinion_id: &str) -> DomainResult<Vec<Comment>>;

    /// Fetch one comment under an opinion or NotFound.
    async fn get_comment(&self, opinion_id: &str, comment_id: &str) -> DomainResult<Comment>;
}
