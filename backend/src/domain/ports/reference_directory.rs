//! Port for existence checks against the relational store.
//!
//! The relational store is the system of record for `users` and `teams`;
//! this core only ever asks "does an entity with this ID exist". The check
//! must be idempotent and side-effect-free.

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;

/// Entity kinds owned by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Team => f.write_str("Team"),
        }
    }
}

define_port_error! {
    /// Errors raised by reference directory adapters.
    pub enum ReferenceDirectoryError {
        /// Connection to the relational store could not be established.
        Connection { message: String } =>
            "reference directory connection failed: {message}",
        /// The existence lookup itself failed.
        Query { message: String } =>
            "reference directory query failed: {message}",
    }
}

/// Existence lookups against the relational store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDirectory: Send + Sync {
    /// Check whether an entity of the given kind exists.
    async fn exists(&self, kind: EntityKind, id: Uuid) -> Result<bool, ReferenceDirectoryError>;
}

/// Fixture that reports every entity as present.
///
/// Use it in tests where referential integrity is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReferenceDirectory;

#[async_trait]
impl ReferenceDirectory for FixtureReferenceDirectory {
    async fn exists(&self, _kind: EntityKind, _id: Uuid) -> Result<bool, ReferenceDirectoryError> {
        Ok(true)
    }
}
