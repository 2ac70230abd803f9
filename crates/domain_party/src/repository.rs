//! Storage port
//!
//! One trait serves every entity. Adapters (PostgreSQL in `infra_db`, the
//! in-memory store in [`crate::memory`]) implement it for each entity type
//! they can hold.

use async_trait::async_trait;

use core_kernel::{DomainPort, FilterQuery, HealthCheckable, PaginationResponse, PartyId, PortError};

use crate::entity::Entity;

/// Persistence operations for one entity type
#[async_trait]
pub trait Repository<E: Entity>: DomainPort + HealthCheckable {
    /// Retrieves a row by primary key
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no row has the identifier
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, PortError>;

    /// Retrieves every row owned by a party, oldest first
    async fn find_by_party_id(&self, party_id: PartyId) -> Result<Vec<E>, PortError>;

    /// Inserts the row or replaces the row with the same identifier
    ///
    /// # Returns
    ///
    /// The row as stored
    async fn save(&self, entity: &E) -> Result<E, PortError>;

    /// Removes a row; removing a missing row is not an error
    async fn delete_by_id(&self, id: E::Id) -> Result<(), PortError>;

    /// Returns one page of rows matching a validated query
    async fn filter(&self, query: &FilterQuery) -> Result<PaginationResponse<E>, PortError>;
}
