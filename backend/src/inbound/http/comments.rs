//! Comment HTTP handlers, always scoped under a parent opinion.
//!
//! ```text
//! POST   /api/v1/opinions/{opinion_id}/comments
//! GET    /api/v1/opinions/{opinion_id}/comments
//! GET    /api/v1/opinions/{opinion_id}/comments/{comment_id}
//! PUT    /api/v1/opinions/{opinion_id}/comments/{comment_id}
//! DELETE /api/v1/opinions/{opinion_id}/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Comment, CommentDraft, Error, JsonObject};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_uuid};

const USER_ID: FieldName = FieldName::new("user_id");
const OPINION_TEAM_ID: FieldName = FieldName::new("opinion_team_id");

/// Request payload for creating or replacing a comment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub user_id: Option<String>,
    pub opinion_team_id: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

fn parse_comment_request(payload: CommentRequest) -> Result<CommentDraft, Error> {
    Ok(CommentDraft {
        user_id: require_uuid(payload.user_id, USER_ID)?,
        opinion_team_id: require_uuid(payload.opinion_team_id, OPINION_TEAM_ID)?,
        extra: payload.extra,
    })
}

/// Attach a comment to an opinion.
#[utoipa::path(
    post,
    path = "/api/v1/opinions/{opinion_id}/comments",
    params(("opinion_id" = String, Path, description = "Parent opinion identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid payload or rejected write", body = Error),
        (status = 404, description = "Referenced user or team not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/opinions/{opinion_id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_comment_request(payload.into_inner())?;
    let comment = state.commands.add_comment(&path.into_inner(), draft).await?;
    Ok(HttpResponse::Created().json(comment))
}

/// List the comments under an opinion. An opinion with no comments yields
/// an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/api/v1/opinions/{opinion_id}/comments",
    params(("opinion_id" = String, Path, description = "Parent opinion identifier")),
    responses(
        (status = 200, description = "Comments under the opinion", body = [Comment]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/opinions/{opinion_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let comments = state.queries.list_comments(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Fetch a single comment.
#[utoipa::path(
    get,
    path = "/api/v1/opinions/{opinion_id}/comments/{comment_id}",
    params(
        ("opinion_id" = String, Path, description = "Parent opinion identifier"),
        ("comment_id" = String, Path, description = "Comment identifier within the opinion")
    ),
    responses(
        (status = 200, description = "The comment", body = Comment),
        (status = 404, description = "Comment not found under this opinion", body = Error)
    ),
    tags = ["comments"],
    operation_id = "getComment"
)]
#[get("/opinions/{opinion_id}/comments/{comment_id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (opinion_id, comment_id) = path.into_inner();
    let comment = state.queries.get_comment(&opinion_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Replace a comment's fields.
#[utoipa::path(
    put,
    path = "/api/v1/opinions/{opinion_id}/comments/{comment_id}",
    params(
        ("opinion_id" = String, Path, description = "Parent opinion identifier"),
        ("comment_id" = String, Path, description = "Comment identifier within the opinion")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = Comment),
        (status = 400, description = "Invalid payload or rejected write", body = Error),
        (status = 404, description = "Comment, user, or team not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[put("/opinions/{opinion_id}/comments/{comment_id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_comment_request(payload.into_inner())?;
    let (opinion_id, comment_id) = path.into_inner();
    let comment = state
        .commands
        .update_comment(&opinion_id, &comment_id, draft)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Delete a comment and return its last stored state.
#[utoipa::path(
    delete,
    path = "/api/v1/opinions/{opinion_id}/comments/{comment_id}",
    params(
        ("opinion_id" = String, Path, description = "Parent opinion identifier"),
        ("comment_id" = String, Path, description = "Comment identifier within the opinion")
    ),
    responses(
        (status = 200, description = "Deleted comment snapshot", body = Comment),
        (status = 404, description = "Opinion or comment not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/opinions/{opinion_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (opinion_id, comment_id) = path.into_inner();
    let comment = state
        .commands
        .delete_comment(&opinion_id, &comment_id)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}
