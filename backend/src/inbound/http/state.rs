//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the driving ports and stay testable without any live store.

use std::sync::Arc;

use crate::domain::ports::{OpinionsCommand, OpinionsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub commands: Arc<dyn OpinionsCommand>,
    pub queries: Arc<dyn OpinionsQuery>,
}

impl HttpState {
    pub fn new(commands: Arc<dyn OpinionsCommand>, queries: Arc<dyn OpinionsQuery>) -> Self {
        Self { commands, queries }
    }
}
