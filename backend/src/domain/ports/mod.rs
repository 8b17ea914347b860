//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod document_database;
mod opinion_comment_store;
mod opinions_command;
mod opinions_query;
mod reference_directory;

#[cfg(test)]
pub use document_database::MockDocumentDatabase;
pub use document_database::{DocumentDatabase, DocumentDatabaseError};
#[cfg(test)]
pub use opinion_comment_store::MockOpinionCommentStore;
pub use opinion_comment_store::{OpinionCommentStore, OpinionCommentStoreError};
#[cfg(test)]
pub use opinions_command::MockOpinionsCommand;
pub use opinions_command::OpinionsCommand;
#[cfg(test)]
pub use opinions_query::MockOpinionsQuery;
pub use opinions_query::OpinionsQuery;
#[cfg(test)]
pub use reference_directory::MockReferenceDirectory;
pub use reference_directory::{
    EntityKind, FixtureReferenceDirectory, ReferenceDirectory, ReferenceDirectoryError,
};
