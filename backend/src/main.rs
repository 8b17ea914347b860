//! Service entry point: wires both stores, the domain service, and the HTTP
//! surface.

use std::env;
use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use fanboard::ApiDoc;
use fanboard::domain::ports::{OpinionsCommand, OpinionsQuery};
use fanboard::domain::{DocumentOpinionCommentStore, OpinionCommentService};
use fanboard::inbound::http::health::{HealthState, live, ready};
use fanboard::inbound::http::state::HttpState;
use fanboard::inbound::http::{comments, opinions};
use fanboard::outbound::documents::MongoDocumentDatabase;
use fanboard::outbound::persistence::{DbPool, DieselReferenceDirectory, PoolConfig};

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!(variable = name, default, "environment variable unset, using default");
        default.to_owned()
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env_or("DATABASE_URL", "postgres://localhost/fanboard");
    let mongo_uri = env_or("MONGODB_URI", "mongodb://localhost:27017");
    let mongo_database = env_or("MONGODB_DATABASE", "fanboard");
    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:8080");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)?;
    let documents = MongoDocumentDatabase::connect(&mongo_uri, &mongo_database)
        .await
        .map_err(io::Error::other)?;

    let store = Arc::new(DocumentOpinionCommentStore::new(Arc::new(documents)));
    let directory = Arc::new(DieselReferenceDirectory::new(pool));
    let service = Arc::new(OpinionCommentService::new(store, directory));
    let commands: Arc<dyn OpinionsCommand> = service.clone();
    let queries: Arc<dyn OpinionsQuery> = service;
    let http_state = web::Data::new(HttpState::new(commands, queries));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory; the original flips readiness below.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .app_data(http_state.clone())
            .service(opinions::create_opinion)
            .service(opinions::list_opinions)
            .service(opinions::list_team_opinions)
            .service(opinions::get_opinion)
            .service(opinions::update_opinion)
            .service(opinions::delete_opinion)
            .service(comments::add_comment)
            .service(comments::list_comments)
            .service(comments::get_comment)
            .service(comments::update_comment)
            .service(comments::delete_comment);

        let app = App::new()
            .app_data(server_health_state.clone())
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app
            .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr.as_str())?;

    health_state.mark_ready();
    info!(address = %bind_addr, "listening");
    server.run().await
}
