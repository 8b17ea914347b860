//! Diesel-backed existence probes for users and teams.

use async_trait::async_trait;
use diesel::dsl::exists as row_exists;
use diesel::{ExpressionMethods, QueryDsl, select};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EntityKind, ReferenceDirectory, ReferenceDirectoryError};

use super::pool::DbPool;
use super::schema::{teams, users};

/// [`ReferenceDirectory`] served by `SELECT EXISTS` probes over PostgreSQL.
#[derive(Clone)]
pub struct DieselReferenceDirectory {
    pool: DbPool,
}

impl DieselReferenceDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceDirectory for DieselReferenceDirectory {
    async fn exists(&self, kind: EntityKind, id: Uuid) -> Result<bool, ReferenceDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ReferenceDirectoryError::connection(err.to_string()))?;

        let probe = match kind {
            EntityKind::User => {
                select(row_exists(users::table.filter(users::id.eq(id))))
                    .get_result::<bool>(&mut conn)
                    .await
            }
            EntityKind::Team => {
                select(row_exists(teams::table.filter(teams::id.eq(id))))
                    .get_result::<bool>(&mut conn)
                    .await
            }
        };

        probe.map_err(|err| ReferenceDirectoryError::query(err.to_string()))
    }
}
