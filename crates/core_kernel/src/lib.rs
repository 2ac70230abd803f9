//! Core Kernel - Foundational types for the party master data service
//!
//! This crate provides the building blocks shared by every layer:
//! - Strongly-typed UUID identifiers for each entity
//! - The dynamic filter and pagination contract used by all search endpoints
//! - Port error and health-check abstractions for storage adapters

pub mod identifiers;
pub mod filter;
pub mod ports;

pub use identifiers::{
    PartyId, NaturalPersonId, LegalEntityId, AddressId, EmailContactId, PhoneContactId,
    IdentityDocumentId, ConsentId, PoliticallyExposedPersonId, PartyStatusId,
    PartyRelationshipId, PartyGroupMembershipId, PartyEconomicActivityId, PartyProviderId,
};
pub use filter::{
    FieldDef, FieldKind, FieldValue, FilterCriterion, FilterError, FilterOperator,
    FilterQuery, FilterRequest, PaginationRequest, PaginationResponse, SortDirection,
};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
