//! HTTP inbound adapter exposing the REST endpoints.

pub mod comments;
pub mod error;
pub mod health;
pub mod opinions;
pub mod state;
pub mod validation;

pub use error::ApiResult;
