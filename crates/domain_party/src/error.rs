//! Party domain errors
//!
//! Every service operation fails with a [`PartyError`]. The variants form a
//! closed set so the HTTP layer can map them to status codes without string
//! matching: missing rows, rows owned by another party, malformed requests,
//! and storage failures.

use thiserror::Error;
use uuid::Uuid;

use core_kernel::{FilterError, PartyId, PortError};

/// Coarse classification of a [`PartyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    OwnershipMismatch,
    InvalidRequest,
    PersistenceFailure,
}

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// No row with the given identifier exists
    #[error("{entity} not found with ID: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// No row exists for the given party
    #[error("{entity} not found for party ID: {party_id}")]
    NotFoundForParty { entity: &'static str, party_id: Uuid },

    /// The row exists but belongs to a different party than the one in the request
    #[error("{entity} with ID {id} does not belong to party {party_id}")]
    OwnershipMismatch {
        entity: &'static str,
        id: Uuid,
        party_id: Uuid,
    },

    /// The filter specification is malformed
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    /// The request is incomplete or inconsistent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The storage layer failed; the message is passed through unchanged
    #[error(transparent)]
    Persistence(#[from] PortError),
}

impl PartyError {
    /// Creates a NotFound error for an entity label and identifier
    pub fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        PartyError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates a NotFoundForParty error
    pub fn not_found_for_party(entity: &'static str, party_id: PartyId) -> Self {
        PartyError::NotFoundForParty {
            entity,
            party_id: party_id.into(),
        }
    }

    /// Creates an OwnershipMismatch error
    pub fn ownership_mismatch(entity: &'static str, id: impl Into<Uuid>, party_id: PartyId) -> Self {
        PartyError::OwnershipMismatch {
            entity,
            id: id.into(),
            party_id: party_id.into(),
        }
    }

    /// Creates an InvalidRequest error
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidRequest(message.into())
    }

    /// Returns the classification used for status mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartyError::NotFound { .. } | PartyError::NotFoundForParty { .. } => ErrorKind::NotFound,
            PartyError::OwnershipMismatch { .. } => ErrorKind::OwnershipMismatch,
            PartyError::InvalidFilter(_) | PartyError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            PartyError::Persistence(_) => ErrorKind::PersistenceFailure,
        }
    }
}
