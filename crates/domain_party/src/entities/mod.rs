//! Entity definitions
//!
//! One module per record type: the entity, its DTO, its field schema and
//! its mapping.

use rust_decimal::Decimal;
use validator::ValidationError;

pub mod party;
pub mod natural_person;
pub mod legal_entity;
pub mod address;
pub mod email_contact;
pub mod phone_contact;
pub mod identity_document;
pub mod consent;
pub mod party_status;
pub mod party_relationship;
pub mod party_group_membership;
pub mod party_economic_activity;
pub mod party_provider;
pub mod politically_exposed_person;

pub use party::{Party, PartyDto};
pub use natural_person::{NaturalPerson, NaturalPersonDto};
pub use legal_entity::{LegalEntity, LegalEntityDto};
pub use address::{Address, AddressDto};
pub use email_contact::{EmailContact, EmailContactDto};
pub use phone_contact::{PhoneContact, PhoneContactDto};
pub use identity_document::{IdentityDocument, IdentityDocumentDto};
pub use consent::{Consent, ConsentDto};
pub use party_status::{PartyStatus, PartyStatusDto};
pub use party_relationship::{PartyRelationship, PartyRelationshipDto};
pub use party_group_membership::{PartyGroupMembership, PartyGroupMembershipDto};
pub use party_economic_activity::{PartyEconomicActivity, PartyEconomicActivityDto};
pub use party_provider::{PartyProvider, PartyProviderDto};
pub use politically_exposed_person::{PoliticallyExposedPerson, PoliticallyExposedPersonDto};

/// Largest magnitude accepted for monetary amounts (18 integer digits)
const MAX_AMOUNT: i64 = 1_000_000_000_000_000_000;

fn within(value: &Decimal, min: Decimal, max: Decimal) -> Result<(), ValidationError> {
    if *value < min || *value > max {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}

pub(crate) fn validate_latitude(value: &Decimal) -> Result<(), ValidationError> {
    within(value, Decimal::from(-90), Decimal::from(90))
}

pub(crate) fn validate_longitude(value: &Decimal) -> Result<(), ValidationError> {
    within(value, Decimal::from(-180), Decimal::from(180))
}

/// Non-negative and representable as `NUMERIC(20, 2)`
pub(crate) fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("range"));
    }
    if *value >= Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}
