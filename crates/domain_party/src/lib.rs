//! Party Master Data Domain
//!
//! This crate holds every record the service keeps about a customer: the
//! [`Party`](entities::Party) root, its natural person or legal entity
//! specialisation, contact points, identity documents, consents, statuses,
//! relationships, group memberships, economic activities, providers and PEP
//! screenings.
//!
//! All record types share one lifecycle, written once:
//!
//! - [`Entity`] and [`Mapper`] describe a record and its transfer object
//! - [`Repository`] is the storage port, implemented by `infra_db` and, for
//!   tests, by [`InMemoryRepository`]
//! - [`CrudService`] performs existence and ownership checks around the port
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_party::{CrudService, InMemoryRepository};
//! use domain_party::entities::{Address, AddressDto};
//!
//! let service = CrudService::<Address>::new(Arc::new(InMemoryRepository::new()));
//! let created = service.create(Some(party_id), dto).await?;
//! let fetched = service.get(Some(party_id), created.id.unwrap()).await?;
//! ```

pub mod codes;
pub mod entities;
pub mod entity;
pub mod error;
pub mod repository;
pub mod service;

#[cfg(any(test, feature = "mock"))]
pub mod memory;

pub use codes::{
    AddressKind, ConsentKind, ConsentStatus, DocumentKind, EmailKind, Gender, MaritalStatus,
    PartyKind, PepCategory, PhoneKind, ProviderStatus, RelationshipKind, StatusCode, UnknownCode,
};
pub use entity::{Entity, Mapper, Ownership};
pub use error::{ErrorKind, PartyError};
pub use repository::Repository;
pub use service::CrudService;

#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryRepository;
