//! In-memory repository for testing
//!
//! Holds rows in a map behind a `tokio` lock and evaluates filter queries
//! with the same semantics as the SQL adapter. Calls to `save` and
//! `delete_by_id` are counted so tests can assert that failed operations
//! never reached storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use core_kernel::{
    DomainPort, FilterQuery, HealthCheckResult, HealthCheckable, PaginationResponse, PartyId,
    PortError,
};

use crate::entity::Entity;
use crate::repository::Repository;

/// In-memory implementation of [`Repository`]
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    rows: Arc<RwLock<HashMap<E::Id, E>>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store without counting the writes
    pub async fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let repository = Self::new();
        {
            let mut rows = repository.rows.write().await;
            for entity in entities {
                rows.insert(entity.id(), entity);
            }
        }
        repository
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_id` calls so far
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: Entity> DomainPort for InMemoryRepository<E> {}

#[async_trait]
impl<E: Entity> HealthCheckable for InMemoryRepository<E> {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(format!("memory-{}", E::LABEL.to_lowercase().replace(' ', "-")), 0)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, PortError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_party_id(&self, party_id: PartyId) -> Result<Vec<E>, PortError> {
        let mut rows: Vec<E> = self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.party_id() == Some(party_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| Into::<Uuid>::into(a.id()).cmp(&b.id().into()))
        });
        Ok(rows)
    }

    async fn save(&self, entity: &E) -> Result<E, PortError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.rows.write().await.insert(entity.id(), entity.clone());
        Ok(entity.clone())
    }

    async fn delete_by_id(&self, id: E::Id) -> Result<(), PortError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.rows.write().await.remove(&id);
        Ok(())
    }

    async fn filter(&self, query: &FilterQuery) -> Result<PaginationResponse<E>, PortError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<(Vec<_>, &E)> = rows
            .values()
            .map(|row| (row.field_values(), row))
            .filter(|(values, _)| query.matches(values))
            .collect();
        matching.sort_by(|(a, _), (b, _)| query.compare_rows(a, b));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit()).unwrap_or(usize::MAX))
            .map(|(_, row)| row.clone())
            .collect();

        Ok(query.page_of(content, total))
    }
}
