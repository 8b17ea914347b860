//! Relational store adapters.
//!
//! PostgreSQL is the system of record for users and teams. The only
//! operation the domain needs from it is an existence probe, served by
//! [`DieselReferenceDirectory`] over a shared async pool.

mod diesel_reference_directory;
pub mod pool;
mod schema;

pub use diesel_reference_directory::DieselReferenceDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
