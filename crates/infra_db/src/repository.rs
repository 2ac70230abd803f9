//! PostgreSQL repository
//!
//! A single generic adapter serves every entity: column lists and bind types
//! come from the entity's field schema, row decoding from [`PgEntity`].

use std::fmt;
use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    DomainPort, FilterQuery, HealthCheckResult, HealthCheckable, PaginationResponse, PartyId,
    PortError,
};
use domain_party::Repository;

use crate::error::DatabaseError;
use crate::query::{column_list, count_matching, select_page, upsert};
use crate::rows::PgEntity;

fn db_to_port_error(error: sqlx::Error) -> PortError {
    DatabaseError::from(error).into()
}

/// PostgreSQL-backed implementation of [`Repository`]
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn select_sql(filter: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {}",
            column_list(E::FIELDS),
            E::TABLE,
            filter
        )
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: PgEntity> fmt::Debug for PgRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository").field("table", &E::TABLE).finish()
    }
}

impl<E: PgEntity> DomainPort for PgRepository<E> {}

#[async_trait]
impl<E: PgEntity> HealthCheckable for PgRepository<E> {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let adapter_id = format!("postgres-{}", E::TABLE);

        match result {
            Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PgRepository<E> {
    #[instrument(skip(self), fields(table = E::TABLE, id = %id))]
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, PortError> {
        debug!("Fetching row by ID");

        let sql = Self::select_sql("id = $1");
        let row = sqlx::query(&sql)
            .bind(Into::<Uuid>::into(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_to_port_error)?;

        row.as_ref()
            .map(E::from_row)
            .transpose()
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self), fields(table = E::TABLE, party_id = %party_id))]
    async fn find_by_party_id(&self, party_id: PartyId) -> Result<Vec<E>, PortError> {
        debug!("Fetching rows by party");

        let sql = format!("{} ORDER BY created_at ASC, id ASC", Self::select_sql("party_id = $1"));
        let rows = sqlx::query(&sql)
            .bind(*party_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(db_to_port_error)?;

        rows.iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, entity), fields(table = E::TABLE, id = %entity.id()))]
    async fn save(&self, entity: &E) -> Result<E, PortError> {
        debug!("Upserting row");

        let mut builder = upsert(E::TABLE, E::FIELDS, &entity.field_values());
        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(db_to_port_error)?;

        E::from_row(&row).map_err(db_to_port_error)
    }

    #[instrument(skip(self), fields(table = E::TABLE, id = %id))]
    async fn delete_by_id(&self, id: E::Id) -> Result<(), PortError> {
        debug!("Deleting row");

        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        sqlx::query(&sql)
            .bind(Into::<Uuid>::into(id))
            .execute(&self.pool)
            .await
            .map_err(db_to_port_error)?;
        Ok(())
    }

    #[instrument(skip(self, query), fields(table = E::TABLE, predicates = query.predicates.len()))]
    async fn filter(&self, query: &FilterQuery) -> Result<PaginationResponse<E>, PortError> {
        debug!(
            page = query.page_number,
            size = query.page_size,
            "Filtering rows"
        );

        let total: i64 = count_matching(E::TABLE, query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_to_port_error)?;

        let rows = select_page(E::TABLE, E::FIELDS, query)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_to_port_error)?;

        let content = rows
            .iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_to_port_error)?;

        Ok(query.page_of(content, u64::try_from(total).unwrap_or(0)))
    }
}
