//! OpenAPI documentation for the REST surface.
//!
//! Swagger UI serves the generated document in debug builds only.

use utoipa::OpenApi;

use crate::domain::{Comment, Error, ErrorCode, Opinion};
use crate::inbound::http::comments::CommentRequest;
use crate::inbound::http::opinions::OpinionRequest;

/// OpenAPI document for the opinions API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fanboard API",
        description = "Team opinions and nested comments over a split document/relational store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::opinions::create_opinion,
        crate::inbound::http::opinions::list_opinions,
        crate::inbound::http::opinions::get_opinion,
        crate::inbound::http::opinions::update_opinion,
        crate::inbound::http::opinions::delete_opinion,
        crate::inbound::http::opinions::list_team_opinions,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Opinion, Comment, OpinionRequest, CommentRequest, Error, ErrorCode)),
    tags(
        (name = "opinions", description = "Team opinion records"),
        (name = "comments", description = "Comments nested under opinions"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
