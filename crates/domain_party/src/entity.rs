//! Generic entity and mapping abstractions
//!
//! Every record kept by the service implements [`Entity`], which exposes the
//! little the generic CRUD machinery needs: identifier, owning party,
//! timestamps, and a typed view of its fields for filtering. [`Mapper`] adds
//! the conversion to and from the transfer representation.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{FieldDef, FieldValue, PartyId};

use crate::error::PartyError;

/// How a child entity relates to the party in the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The entity is a party itself
    Root,
    /// Reads and writes are rejected when the stored party differs from the path
    Enforced,
    /// The path party is not compared with the stored one
    Unchecked,
}

/// A persisted record
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Typed identifier of the entity
    type Id: Copy
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + From<Uuid>
        + Into<Uuid>
        + Into<FieldValue>
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Human readable name used in error messages
    const LABEL: &'static str;

    const OWNERSHIP: Ownership;

    /// Filterable fields, aligned with [`Entity::field_values`]
    const FIELDS: &'static [FieldDef];

    /// Generates a fresh time-ordered identifier
    fn new_id() -> Self::Id {
        Self::Id::from(Uuid::now_v7())
    }

    fn id(&self) -> Self::Id;

    /// Owning party; `None` only for the root entity
    fn party_id(&self) -> Option<PartyId>;

    fn set_party_id(&mut self, party_id: PartyId);

    fn created_at(&self) -> DateTime<Utc>;

    /// Assigns identity and both timestamps to a new record
    fn init_metadata(&mut self, id: Self::Id, now: DateTime<Utc>);

    /// Records a modification
    fn touch(&mut self, now: DateTime<Utc>);

    /// Current field values in [`Entity::FIELDS`] order
    fn field_values(&self) -> Vec<FieldValue>;
}

/// Conversion between an entity and its transfer object
pub trait Mapper: Entity {
    type Dto: Clone
        + fmt::Debug
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Validate
        + Send
        + Sync
        + 'static;

    fn to_dto(&self) -> Self::Dto;

    /// Builds an entity from a DTO
    ///
    /// A missing id becomes a fresh identifier and missing timestamps become
    /// the current time. Missing boolean flags (`is_primary`, `is_verified`,
    /// ...) become `false`, so they read back as `Some(false)`.
    ///
    /// # Errors
    ///
    /// Returns `PartyError::InvalidRequest` when a child DTO carries no `party_id`
    fn to_entity(dto: Self::Dto) -> Result<Self, PartyError>;

    /// Applies a DTO onto an existing entity
    ///
    /// Required fields are overwritten and optional fields only when present.
    /// Identity, owner and timestamps are left alone.
    fn merge(&mut self, dto: Self::Dto);

    /// The party referenced by a DTO, if any
    fn dto_party_id(dto: &Self::Dto) -> Option<PartyId>;

    /// Sets the owning party of a DTO
    fn assign_party(dto: &mut Self::Dto, party_id: PartyId);
}

/// Resolves the owning party of a child DTO
pub(crate) fn require_party(party_id: Option<PartyId>) -> Result<PartyId, PartyError> {
    party_id.ok_or_else(|| PartyError::invalid("party_id is required"))
}

/// Replaces `target` when the DTO carries a value
pub(crate) fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Replaces `target` when the DTO carries a value for a non-null field
pub(crate) fn merge_val<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Implements the identity, owner and timestamp accessors of a child entity
///
/// The entity must have `id`, `party_id`, `created_at` and `updated_at` fields.
macro_rules! child_metadata {
    () => {
        fn id(&self) -> Self::Id {
            self.id
        }

        fn party_id(&self) -> Option<::core_kernel::PartyId> {
            Some(self.party_id)
        }

        fn set_party_id(&mut self, party_id: ::core_kernel::PartyId) {
            self.party_id = party_id;
        }

        fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
            self.created_at
        }

        fn init_metadata(&mut self, id: Self::Id, now: ::chrono::DateTime<::chrono::Utc>) {
            self.id = id;
            self.created_at = now;
            self.updated_at = now;
        }

        fn touch(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
            self.updated_at = now;
        }
    };
}

pub(crate) use child_metadata;
