//! Domain core: records, the opinion/comment store and service, and the
//! ports they communicate through.
//!
//! The domain is transport agnostic. Inbound adapters (HTTP) translate
//! [`Error`] into wire responses; outbound adapters implement the ports
//! against PostgreSQL and the document store.

pub mod documents;
pub mod error;
pub mod opinion;
pub mod opinion_comment_store;
pub mod opinion_service;
pub mod ports;

pub use self::documents::{CollectionPath, JsonObject};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::opinion::{Comment, CommentDraft, Opinion, OpinionDraft};
pub use self::opinion_comment_store::DocumentOpinionCommentStore;
pub use self::opinion_service::OpinionCommentService;

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
