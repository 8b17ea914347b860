//! Document store adapters.
//!
//! [`MongoDocumentDatabase`] is the production client; the in-memory
//! implementation backs tests and local development without a running
//! server.

mod memory;
mod mongo;

pub use memory::InMemoryDocumentDatabase;
pub use mongo::MongoDocumentDatabase;
