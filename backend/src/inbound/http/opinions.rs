//! Opinion HTTP handlers.
//!
//! ```text
//! POST   /api/v1/opinions
//! GET    /api/v1/opinions
//! GET    /api/v1/opinions/{id}
//! PUT    /api/v1/opinions/{id}
//! DELETE /api/v1/opinions/{id}
//! GET    /api/v1/teams/{team_id}/opinions
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, JsonObject, Opinion, OpinionDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require_uuid};

const USER_ID: FieldName = FieldName::new("user_id");
const TEAM_ID: FieldName = FieldName::new("team_id");

/// Request payload for creating or replacing an opinion.
///
/// Foreign keys are explicit; every other field flows through verbatim as
/// the free-form payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpinionRequest {
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: JsonObject,
}

fn parse_opinion_request(payload: OpinionRequest) -> Result<OpinionDraft, Error> {
    Ok(OpinionDraft {
        user_id: require_uuid(payload.user_id, USER_ID)?,
        team_id: require_uuid(payload.team_id, TEAM_ID)?,
        extra: payload.extra,
    })
}

/// Record a new opinion.
#[utoipa::path(
    post,
    path = "/api/v1/opinions",
    request_body = OpinionRequest,
    responses(
        (status = 201, description = "Opinion created", body = Opinion),
        (status = 400, description = "Invalid payload or rejected write", body = Error),
        (status = 404, description = "Referenced user or team not found", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "createOpinion"
)]
#[post("/opinions")]
pub async fn create_opinion(
    state: web::Data<HttpState>,
    payload: web::Json<OpinionRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_opinion_request(payload.into_inner())?;
    let opinion = state.commands.create_opinion(draft).await?;
    Ok(HttpResponse::Created().json(opinion))
}

/// List every recorded opinion.
#[utoipa::path(
    get,
    path = "/api/v1/opinions",
    responses(
        (status = 200, description = "All opinions", body = [Opinion]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "listOpinions"
)]
#[get("/opinions")]
pub async fn list_opinions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let opinions = state.queries.list_opinions().await?;
    Ok(HttpResponse::Ok().json(opinions))
}

/// Fetch a single opinion.
#[utoipa::path(
    get,
    path = "/api/v1/opinions/{id}",
    params(("id" = String, Path, description = "Opinion identifier")),
    responses(
        (status = 200, description = "The opinion", body = Opinion),
        (status = 404, description = "Opinion not found", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "getOpinion"
)]
#[get("/opinions/{id}")]
pub async fn get_opinion(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let opinion = state.queries.get_opinion(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(opinion))
}

/// Replace an opinion's fields.
#[utoipa::path(
    put,
    path = "/api/v1/opinions/{id}",
    params(("id" = String, Path, description = "Opinion identifier")),
    request_body = OpinionRequest,
    responses(
        (status = 200, description = "Updated opinion", body = Opinion),
        (status = 400, description = "Invalid payload or rejected write", body = Error),
        (status = 404, description = "Opinion, user, or team not found", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "updateOpinion"
)]
#[put("/opinions/{id}")]
pub async fn update_opinion(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<OpinionRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_opinion_request(payload.into_inner())?;
    let opinion = state
        .commands
        .update_opinion(&path.into_inner(), draft)
        .await?;
    Ok(HttpResponse::Ok().json(opinion))
}

/// Delete an opinion and return its last stored state.
#[utoipa::path(
    delete,
    path = "/api/v1/opinions/{id}",
    params(("id" = String, Path, description = "Opinion identifier")),
    responses(
        (status = 200, description = "Deleted opinion snapshot", body = Opinion),
        (status = 404, description = "Opinion not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "deleteOpinion"
)]
#[delete("/opinions/{id}")]
pub async fn delete_opinion(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let opinion = state.commands.delete_opinion(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(opinion))
}

/// List the opinions recorded against one team.
#[utoipa::path(
    get,
    path = "/api/v1/teams/{team_id}/opinions",
    params(("team_id" = String, Path, description = "Team identifier (UUID)")),
    responses(
        (status = 200, description = "Opinions for the team", body = [Opinion]),
        (status = 400, description = "Malformed team identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["opinions"],
    operation_id = "listTeamOpinions"
)]
#[get("/teams/{team_id}/opinions")]
pub async fn list_team_opinions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let team_id = parse_uuid(path.into_inner(), TEAM_ID)?;
    let opinions = state.queries.list_opinions_by_team(team_id).await?;
    Ok(HttpResponse::Ok().json(opinions))
}
