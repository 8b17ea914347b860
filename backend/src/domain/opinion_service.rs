//! Opinion/comment orchestration service.
//!
//! The service enforces referential integrity across the split stores:
//! before any document write it resolves every foreign key in the payload
//! against the relational store, and only when all of them exist does it
//! delegate to the store. The existence check and the write are two
//! independent round trips with no transaction between them; a reference
//! deleted in that window is not detected. This is an accepted risk of the
//! design, not an oversight.
//!
//! Error translation is uniform: a NotFound raised anywhere inside an
//! operation propagates unchanged, while every other failure is re-wrapped
//! with the operation's context — BadRequest on create/update/add paths,
//! InternalError on read/list/delete paths — preserving the original
//! message for diagnostics.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    EntityKind, OpinionCommentStore, OpinionsCommand, OpinionsQuery, ReferenceDirectory,
};
use crate::domain::{
    Comment, CommentDraft, DomainResult, Error, ErrorCode, Opinion, OpinionDraft,
};

/// Service implementing the opinion/comment driving ports.
#[derive(Clone)]
pub struct OpinionCommentService<S, R> {
    store: Arc<S>,
    directory: Arc<R>,
}

impl<S, R> OpinionCommentService<S, R> {
    /// Create a new service over the given store and reference directory.
    pub fn new(store: Arc<S>, directory: Arc<R>) -> Self {
        Self { store, directory }
    }
}

/// Re-wrap non-NotFound failures with the operation's context, erasing the
/// original class but keeping its message.
fn rewrap(error: Error, code: ErrorCode, context: &str) -> Error {
    if error.code() == ErrorCode::NotFound {
        return error;
    }
    Error::new(code, format!("{context}: {}", error.message()))
}

fn missing(kind: EntityKind, id: Uuid) -> Error {
    Error::not_found(format!("{kind} with ID {id} not found"))
}

fn missing_opinion(id: &str) -> Error {
    Error::not_found(format!("Opinion with ID {id} not found"))
}

fn missing_comment(opinion_id: &str, comment_id: &str) -> Error {
    Error::not_found(format!(
        "Comment with ID {comment_id} not found for opinion with ID {opinion_id}"
    ))
}

impl<S, R> OpinionCommentService<S, R>
where
    S: OpinionCommentStore,
    R: ReferenceDirectory,
{
    async fn require_exists(&self, kind: EntityKind, id: Uuid) -> DomainResult<()> {
        let found = self
            .directory
            .exists(kind, id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        if found { Ok(()) } else { Err(missing(kind, id)) }
    }

    /// Validation pass for opinion payloads: both foreign keys must resolve.
    async fn validate_opinion_refs(&self, draft: &OpinionDraft) -> DomainResult<()> {
        self.require_exists(EntityKind::User, draft.user_id).await?;
        self.require_exists(EntityKind::Team, draft.team_id).await
    }

    /// Validation pass for comment payloads.
    async fn validate_comment_refs(&self, draft: &CommentDraft) -> DomainResult<()> {
        self.require_exists(EntityKind::User, draft.user_id).await?;
        self.require_exists(EntityKind::Team, draft.opinion_team_id)
            .await
    }
}

#[async_trait]
impl<S, R> OpinionsCommand for OpinionCommentService<S, R>
where
    S: OpinionCommentStore,
    R: ReferenceDirectory,
{
    async fn create_opinion(&self, draft: OpinionDraft) -> DomainResult<Opinion> {
        let result: DomainResult<Opinion> = async {
            self.validate_opinion_refs(&draft).await?;
            self.store
                .create_opinion(&draft)
                .await
                .map_err(|err| Error::internal(err.to_string()))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::BadRequest, "Error creating opinion"))
    }

    async fn update_opinion(&self, id: &str, draft: OpinionDraft) -> DomainResult<Opinion> {
        let result: DomainResult<Opinion> = async {
            // The full draft is re-validated on every update, including
            // foreign keys that are not changing.
            self.validate_opinion_refs(&draft).await?;
            let updated = self
                .store
                .update_opinion(id, &draft)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            // Redundant with the validation pass in typical flows, but
            // guards against a delete racing the update.
            updated.ok_or_else(|| missing_opinion(id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::BadRequest, "Error updating opinion"))
    }

    async fn delete_opinion(&self, id: &str) -> DomainResult<Opinion> {
        let result: DomainResult<Opinion> = async {
            let deleted = self
                .store
                .delete_opinion(id)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            deleted.ok_or_else(|| missing_opinion(id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::InternalError, "Error deleting opinion"))
    }

    async fn add_comment(&self, opinion_id: &str, draft: CommentDraft) -> DomainResult<Comment> {
        let result: DomainResult<Comment> = async {
            self.validate_comment_refs(&draft).await?;
            // The parent opinion is deliberately not checked here; an orphan
            // comment write is accepted.
            self.store
                .add_comment(opinion_id, &draft)
                .await
                .map_err(|err| Error::internal(err.to_string()))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::BadRequest, "Error adding comment"))
    }

    async fn update_comment(
        &self,
        opinion_id: &str,
        comment_id: &str,
        draft: CommentDraft,
    ) -> DomainResult<Comment> {
        let result: DomainResult<Comment> = async {
            self.validate_comment_refs(&draft).await?;
            let updated = self
                .store
                .update_comment(opinion_id, comment_id, &draft)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            updated.ok_or_else(|| missing_comment(opinion_id, comment_id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::BadRequest, "Error updating comment"))
    }

    async fn delete_comment(&self, opinion_id: &str, comment_id: &str) -> DomainResult<Comment> {
        let result: DomainResult<Comment> = async {
            // The one comment path that does confirm the parent exists.
            let parent = self
                .store
                .get_opinion(opinion_id)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            if parent.is_none() {
                return Err(missing_opinion(opinion_id));
            }
            let deleted = self
                .store
                .delete_comment(opinion_id, comment_id)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            deleted.ok_or_else(|| missing_comment(opinion_id, comment_id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::InternalError, "Error deleting comment"))
    }
}

#[async_trait]
impl<S, R> OpinionsQuery for OpinionCommentService<S, R>
where
    S: OpinionCommentStore,
    R: ReferenceDirectory,
{
    async fn get_opinion(&self, id: &str) -> DomainResult<Opinion> {
        let result: DomainResult<Opinion> = async {
            let opinion = self
                .store
                .get_opinion(id)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            opinion.ok_or_else(|| missing_opinion(id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::InternalError, "Error fetching opinion"))
    }

    async fn list_opinions(&self) -> DomainResult<Vec<Opinion>> {
        self.store
            .list_opinions()
            .await
            .map_err(|err| Error::internal(format!("Error fetching opinions: {err}")))
    }

    async fn list_opinions_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Opinion>> {
        self.store
            .list_opinions_by_team(team_id)
            .await
            .map_err(|err| Error::internal(format!("Error fetching opinions: {err}")))
    }

    async fn list_comments(&self, opinion_id: &str) -> DomainResult<Vec<Comment>> {
        // An empty list is success-with-zero-items, not NotFound; callers
        // that need to distinguish an absent opinion fetch it explicitly.
        self.store
            .list_comments(opinion_id)
            .await
            .map_err(|err| Error::internal(format!("Error fetching comments: {err}")))
    }

    async fn get_comment(&self, opinion_id: &str, comment_id: &str) -> DomainResult<Comment> {
        let result: DomainResult<Comment> = async {
            let comment = self
                .store
                .get_comment(opinion_id, comment_id)
                .await
                .map_err(|err| Error::internal(err.to_string()))?;
            comment.ok_or_else(|| missing_comment(opinion_id, comment_id))
        }
        .await;
        result.map_err(|err| rewrap(err, ErrorCode::InternalError, "Error fetching comment"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JsonObject;
    use crate::domain::ports::{
        MockOpinionCommentStore, MockReferenceDirectory, OpinionCommentStoreError,
        ReferenceDirectoryError,
    };
    use serde_json::json;

    type Service = OpinionCommentService<MockOpinionCommentStore, MockReferenceDirectory>;

    fn service(store: MockOpinionCommentStore, directory: MockReferenceDirectory) -> Service {
        OpinionCommentService::new(Arc::new(store), Arc::new(directory))
    }

    fn extra(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    fn opinion_draft() -> OpinionDraft {
        OpinionDraft {
            user_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            extra: extra(json!({ "body": "solid midfield" })),
        }
    }

    fn comment_draft() -> CommentDraft {
        CommentDraft {
            user_id: Uuid::new_v4(),
            opinion_team_id: Uuid::new_v4(),
            extra: extra(json!({ "text": "fully agree" })),
        }
    }

    fn opinion_from(id: &str, draft: &OpinionDraft) -> Opinion {
        Opinion {
            id: id.to_owned(),
            user_id: draft.user_id,
            team_id: draft.team_id,
            extra: draft.extra.clone(),
        }
    }

    fn directory_with_all_present() -> MockReferenceDirectory {
        let mut directory = MockReferenceDirectory::new();
        directory.expect_exists().returning(|_, _| Ok(true));
        directory
    }

    #[tokio::test]
    async fn create_opinion_echoes_store_result_when_refs_resolve() {
        let draft = opinion_draft();
        let expected = opinion_from("o1", &draft);

        let mut directory = MockReferenceDirectory::new();
        let user_id = draft.user_id;
        let team_id = draft.team_id;
        directory
            .expect_exists()
            .withf(move |kind, id| *kind == EntityKind::User && *id == user_id)
            .times(1)
            .returning(|_, _| Ok(true));
        directory
            .expect_exists()
            .withf(move |kind, id| *kind == EntityKind::Team && *id == team_id)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut store = MockOpinionCommentStore::new();
        let echoed = expected.clone();
        store
            .expect_create_opinion()
            .times(1)
            .return_once(move |_| Ok(echoed));

        let created = service(store, directory)
            .create_opinion(draft)
            .await
            .expect("create succeeds");
        assert_eq!(created, expected);
    }

    #[tokio::test]
    async fn create_opinion_rejects_missing_user_without_writing() {
        let draft = opinion_draft();
        let ghost = draft.user_id;

        let mut directory = MockReferenceDirectory::new();
        directory
            .expect_exists()
            .withf(move |kind, _| *kind == EntityKind::User)
            .times(1)
            .returning(|_, _| Ok(false));

        let mut store = MockOpinionCommentStore::new();
        store.expect_create_opinion().times(0);

        let err = service(store, directory)
            .create_opinion(draft)
            .await
            .expect_err("missing user rejected");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains(&ghost.to_string()));
    }

    #[tokio::test]
    async fn create_opinion_rejects_missing_team_without_writing() {
        let draft = opinion_draft();
        let team_id = draft.team_id;

        let mut directory = MockReferenceDirectory::new();
        directory
            .expect_exists()
            .returning(move |kind, _| Ok(kind == EntityKind::User));

        let mut store = MockOpinionCommentStore::new();
        store.expect_create_opinion().times(0);

        let err = service(store, directory)
            .create_opinion(draft)
            .await
            .expect_err("missing team rejected");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("Team"));
        assert!(err.message().contains(&team_id.to_string()));
    }

    #[tokio::test]
    async fn create_opinion_wraps_store_faults_as_bad_request() {
        let mut store = MockOpinionCommentStore::new();
        store
            .expect_create_opinion()
            .return_once(|_| Err(OpinionCommentStoreError::backend("write timed out")));

        let err = service(store, directory_with_all_present())
            .create_opinion(opinion_draft())
            .await
            .expect_err("store fault surfaces");
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.message().starts_with("Error creating opinion:"));
        assert!(err.message().contains("write timed out"));
    }

    #[tokio::test]
    async fn create_opinion_wraps_directory_faults_as_bad_request() {
        let mut directory = MockReferenceDirectory::new();
        directory
            .expect_exists()
            .return_once(|_, _| Err(ReferenceDirectoryError::connection("pool exhausted")));

        let mut store = MockOpinionCommentStore::new();
        store.expect_create_opinion().times(0);

        let err = service(store, directory)
            .create_opinion(opinion_draft())
            .await
            .expect_err("lookup fault surfaces");
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.message().contains("pool exhausted"));
    }

    #[tokio::test]
    async fn get_opinion_maps_absent_to_not_found() {
        let mut store = MockOpinionCommentStore::new();
        store.expect_get_opinion().return_once(|_| Ok(None));

        let err = service(store, MockReferenceDirectory::new())
            .get_opinion("o404")
            .await
            .expect_err("absent opinion");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("o404"));
    }

    #[tokio::test]
    async fn get_opinion_wraps_store_faults_as_internal() {
        let mut store = MockOpinionCommentStore::new();
        store
            .expect_get_opinion()
            .return_once(|_| Err(OpinionCommentStoreError::backend("socket closed")));

        let err = service(store, MockReferenceDirectory::new())
            .get_opinion("o1")
            .await
            .expect_err("store fault surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().starts_with("Error fetching opinion:"));
    }

    #[tokio::test]
    async fn update_opinion_revalidates_both_foreign_keys() {
        let draft = opinion_draft();
        let expected = opinion_from("o1", &draft);

        let mut directory = MockReferenceDirectory::new();
        directory
            .expect_exists()
            .times(2)
            .returning(|_, _| Ok(true));

        let mut store = MockOpinionCommentStore::new();
        let echoed = expected.clone();
        store
            .expect_update_opinion()
            .times(1)
            .return_once(move |_, _| Ok(Some(echoed)));

        let updated = service(store, directory)
            .update_opinion("o1", draft)
            .await
            .expect("update succeeds");
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn update_opinion_maps_unmatched_write_to_not_found() {
        let mut store = MockOpinionCommentStore::new();
        store.expect_update_opinion().return_once(|_, _| Ok(None));

        let err = service(store, directory_with_all_present())
            .update_opinion("gone", opinion_draft())
            .await
            .expect_err("vanished opinion");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("gone"));
    }

    #[tokio::test]
    async fn delete_opinion_returns_snapshot_or_not_found() {
        let draft = opinion_draft();
        let snapshot = opinion_from("o1", &draft);

        let mut store = MockOpinionCommentStore::new();
        let echoed = snapshot.clone();
        store
            .expect_delete_opinion()
            .return_once(move |_| Ok(Some(echoed)));
        let deleted = service(store, MockReferenceDirectory::new())
            .delete_opinion("o1")
            .await
            .expect("delete succeeds");
        assert_eq!(deleted, snapshot);

        let mut store = MockOpinionCommentStore::new();
        store.expect_delete_opinion().return_once(|_| Ok(None));
        let err = service(store, MockReferenceDirectory::new())
            .delete_opinion("o1")
            .await
            .expect_err("absent opinion");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn add_comment_skips_parent_check() {
        let draft = comment_draft();

        let mut store = MockOpinionCommentStore::new();
        store.expect_get_opinion().times(0);
        let echoed = Comment {
            id: "c1".to_owned(),
            user_id: draft.user_id,
            opinion_team_id: draft.opinion_team_id,
            extra: draft.extra.clone(),
        };
        store
            .expect_add_comment()
            .times(1)
            .return_once(move |_, _| Ok(echoed));

        let comment = service(store, directory_with_all_present())
            .add_comment("never-created", draft)
            .await
            .expect("orphan add accepted");
        assert_eq!(comment.id, "c1");
    }

    #[tokio::test]
    async fn add_comment_validates_comment_team_context() {
        let draft = comment_draft();
        let team = draft.opinion_team_id;

        let mut directory = MockReferenceDirectory::new();
        directory
            .expect_exists()
            .returning(move |kind, _| Ok(kind == EntityKind::User));

        let mut store = MockOpinionCommentStore::new();
        store.expect_add_comment().times(0);

        let err = service(store, directory)
            .add_comment("o1", draft)
            .await
            .expect_err("missing team context");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains(&team.to_string()));
    }

    #[tokio::test]
    async fn delete_comment_checks_the_parent_first() {
        let mut store = MockOpinionCommentStore::new();
        store.expect_get_opinion().times(1).return_once(|_| Ok(None));
        store.expect_delete_comment().times(0);

        let err = service(store, MockReferenceDirectory::new())
            .delete_comment("o-ghost", "c1")
            .await
            .expect_err("parent missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("Opinion with ID o-ghost"));
    }

    #[tokio::test]
    async fn delete_comment_reports_missing_comment_under_live_parent() {
        let draft = opinion_draft();
        let parent = opinion_from("o1", &draft);

        let mut store = MockOpinionCommentStore::new();
        store
            .expect_get_opinion()
            .return_once(move |_| Ok(Some(parent)));
        store.expect_delete_comment().return_once(|_, _| Ok(None));

        let err = service(store, MockReferenceDirectory::new())
            .delete_comment("o1", "c-ghost")
            .await
            .expect_err("comment missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("c-ghost"));
        assert!(err.message().contains("o1"));
    }

    #[tokio::test]
    async fn list_comments_treats_zero_items_as_success() {
        let mut store = MockOpinionCommentStore::new();
        store.expect_list_comments().return_once(|_| Ok(Vec::new()));

        let comments = service(store, MockReferenceDirectory::new())
            .list_comments("o1")
            .await
            .expect("empty list is success");
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn list_faults_are_internal_with_context() {
        let mut store = MockOpinionCommentStore::new();
        store
            .expect_list_opinions()
            .return_once(|| Err(OpinionCommentStoreError::backend("cursor died")));

        let err = service(store, MockReferenceDirectory::new())
            .list_opinions()
            .await
            .expect_err("list fault surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().starts_with("Error fetching opinions:"));
    }

    #[tokio::test]
    async fn update_comment_maps_unmatched_write_to_not_found() {
        let mut store = MockOpinionCommentStore::new();
        store
            .expect_update_comment()
            .return_once(|_, _, _| Ok(None));

        let err = service(store, directory_with_all_present())
            .update_comment("o1", "c-gone", comment_draft())
            .await
            .expect_err("vanished comment");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("c-gone"));
    }
}
