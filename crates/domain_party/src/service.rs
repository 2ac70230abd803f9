//! Generic CRUD service
//!
//! [`CrudService`] implements the lifecycle shared by every entity: create,
//! read, update, delete, list by owner and filtered search. Existence is
//! always checked before a mutation; ownership is checked according to the
//! entity's [`Ownership`] policy.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{FilterRequest, PaginationResponse, PartyId};

use crate::entities::PartyStatus;
use crate::entity::{Entity, Mapper, Ownership};
use crate::error::PartyError;
use crate::repository::Repository;

/// CRUD operations for one entity type over a [`Repository`]
pub struct CrudService<E: Mapper> {
    repository: Arc<dyn Repository<E>>,
}

impl<E: Mapper> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: Mapper> CrudService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository }
    }

    /// The underlying storage port
    pub fn repository(&self) -> &Arc<dyn Repository<E>> {
        &self.repository
    }

    /// Creates a new record
    ///
    /// # Arguments
    ///
    /// * `party_id` - Owning party taken from the request path, if nested
    /// * `dto` - The record to create; its id and timestamps are replaced
    ///
    /// # Returns
    ///
    /// The stored record
    #[instrument(skip(self, dto), fields(entity = E::LABEL))]
    pub async fn create(&self, party_id: Option<PartyId>, mut dto: E::Dto) -> Result<E::Dto, PartyError> {
        if let Some(party_id) = party_id {
            E::assign_party(&mut dto, party_id);
        }

        let mut entity = E::to_entity(dto)?;
        entity.init_metadata(E::new_id(), Utc::now());

        let saved = self.repository.save(&entity).await?;
        info!(id = %saved.id(), "Created {}", E::LABEL);
        Ok(saved.to_dto())
    }

    /// Retrieves a record
    ///
    /// # Errors
    ///
    /// * `NotFound` if no record has the identifier
    /// * `OwnershipMismatch` if the entity enforces ownership and belongs to another party
    #[instrument(skip(self), fields(entity = E::LABEL))]
    pub async fn get(&self, party_id: Option<PartyId>, id: E::Id) -> Result<E::Dto, PartyError> {
        let entity = self.fetch(party_id, id).await?;
        Ok(entity.to_dto())
    }

    /// Applies a DTO onto an existing record
    ///
    /// Entities that do not check ownership move to the party named in the
    /// body when one is given.
    #[instrument(skip(self, dto), fields(entity = E::LABEL))]
    pub async fn update(
        &self,
        party_id: Option<PartyId>,
        id: E::Id,
        dto: E::Dto,
    ) -> Result<E::Dto, PartyError> {
        let mut entity = self.fetch(party_id, id).await?;

        let new_owner = match E::OWNERSHIP {
            Ownership::Unchecked => E::dto_party_id(&dto),
            Ownership::Root | Ownership::Enforced => None,
        };
        entity.merge(dto);
        if let Some(owner) = new_owner {
            entity.set_party_id(owner);
        }
        entity.touch(Utc::now());

        let saved = self.repository.save(&entity).await?;
        info!(id = %saved.id(), "Updated {}", E::LABEL);
        Ok(saved.to_dto())
    }

    /// Removes a record
    #[instrument(skip(self), fields(entity = E::LABEL))]
    pub async fn delete(&self, party_id: Option<PartyId>, id: E::Id) -> Result<(), PartyError> {
        let entity = self.fetch(party_id, id).await?;
        self.repository.delete_by_id(entity.id()).await?;
        info!(id = %id, "Deleted {}", E::LABEL);
        Ok(())
    }

    /// Returns every record owned by a party
    #[instrument(skip(self), fields(entity = E::LABEL))]
    pub async fn list_by_party(&self, party_id: PartyId) -> Result<Vec<E::Dto>, PartyError> {
        let rows = self.repository.find_by_party_id(party_id).await?;
        debug!(count = rows.len(), "Listed {} rows", E::LABEL);
        Ok(rows.iter().map(E::to_dto).collect())
    }

    /// Runs a filtered, paged search
    ///
    /// The path party is not applied to the search; callers needing a
    /// party-scoped search add a `party_id` criterion.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` when the request does not fit the entity's fields
    #[instrument(skip(self, request), fields(entity = E::LABEL, criteria = request.filters.len()))]
    pub async fn filter(
        &self,
        party_id: Option<PartyId>,
        request: &FilterRequest,
    ) -> Result<PaginationResponse<E::Dto>, PartyError> {
        if let Some(party_id) = party_id {
            debug!(%party_id, "Path party is not applied to filter");
        }

        let query = request.validate(E::FIELDS)?;
        let page = self.repository.filter(&query).await?;
        debug!(total = page.total_elements, "Filtered {}", E::LABEL);
        Ok(page.map(|entity| entity.to_dto()))
    }

    async fn fetch(&self, party_id: Option<PartyId>, id: E::Id) -> Result<E, PartyError> {
        let entity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PartyError::not_found(E::LABEL, id))?;

        if let (Ownership::Enforced, Some(expected)) = (E::OWNERSHIP, party_id) {
            if entity.party_id() != Some(expected) {
                warn!(%id, party_id = %expected, "{} belongs to another party", E::LABEL);
                return Err(PartyError::ownership_mismatch(E::LABEL, id, expected));
            }
        }

        Ok(entity)
    }
}

// ============================================================================
// Party status lookups by owner
// ============================================================================

impl CrudService<PartyStatus> {
    /// Retrieves the current status of a party
    ///
    /// The current status is the most recently created status row.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundForParty` when the party has no status
    #[instrument(skip(self))]
    pub async fn get_by_party(&self, party_id: PartyId) -> Result<<PartyStatus as Mapper>::Dto, PartyError> {
        let status = self.current_status(party_id).await?;
        Ok(status.to_dto())
    }

    /// Applies a DTO onto the current status of a party
    #[instrument(skip(self, dto))]
    pub async fn update_by_party(
        &self,
        party_id: PartyId,
        dto: <PartyStatus as Mapper>::Dto,
    ) -> Result<<PartyStatus as Mapper>::Dto, PartyError> {
        let mut status = self.current_status(party_id).await?;
        status.merge(dto);
        status.touch(Utc::now());

        let saved = self.repository.save(&status).await?;
        info!(id = %saved.id, %party_id, "Updated current party status");
        Ok(saved.to_dto())
    }

    async fn current_status(&self, party_id: PartyId) -> Result<PartyStatus, PartyError> {
        self.repository
            .find_by_party_id(party_id)
            .await?
            .into_iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            .ok_or_else(|| PartyError::not_found_for_party(PartyStatus::LABEL, party_id))
    }
}
