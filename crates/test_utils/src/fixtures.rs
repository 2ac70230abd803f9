//! Pre-built Test Fixtures
//!
//! Valid transfer objects for every entity, ready to be sent to a service or
//! an endpoint. Identifiers and timestamps are left empty so the server
//! assigns them.

use chrono::{NaiveDate, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::PartyId;
use domain_party::entities::*;
use domain_party::*;

/// Fixture for party master data
pub struct PartyFixtures;

impl PartyFixtures {
    pub fn party(kind: PartyKind) -> PartyDto {
        PartyDto {
            id: None,
            party_kind: kind,
            tenant_id: Some("retail".to_string()),
            preferred_language: Some("es-ES".to_string()),
            source_system: Some("CRM".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn natural_person(party_id: PartyId) -> NaturalPersonDto {
        NaturalPersonDto {
            id: None,
            party_id: Some(party_id),
            title: None,
            given_name: "Lucía".to_string(),
            middle_name: None,
            family_name: "Fernández".to_string(),
            second_family_name: Some("Ruiz".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 4, 2),
            birth_place: Some("Valencia".to_string()),
            gender: Some(Gender::Female),
            marital_status: Some(MaritalStatus::Single),
            nationality_country: Some("ES".to_string()),
            tax_id_number: Some("12345678Z".to_string()),
            profession: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// A natural person with randomly generated names
    pub fn random_natural_person(party_id: PartyId) -> NaturalPersonDto {
        NaturalPersonDto {
            given_name: FirstName().fake(),
            family_name: LastName().fake(),
            ..Self::natural_person(party_id)
        }
    }

    pub fn legal_entity(party_id: PartyId) -> LegalEntityDto {
        LegalEntityDto {
            id: None,
            party_id: Some(party_id),
            legal_name: "Acme Holdings S.L.".to_string(),
            trade_name: Some("Acme".to_string()),
            registration_number: Some("B12345678".to_string()),
            tax_id_number: Some("ESB12345678".to_string()),
            legal_form: Some("SL".to_string()),
            incorporation_date: NaiveDate::from_ymd_opt(2009, 11, 20),
            incorporation_country: Some("ES".to_string()),
            industry_description: None,
            headcount: Some(120),
            share_capital: Some(dec!(3000.00)),
            website_url: Some("https://acme.example".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn address(party_id: PartyId) -> AddressDto {
        AddressDto {
            id: None,
            party_id: Some(party_id),
            address_kind: AddressKind::Home,
            line1: "Calle Mayor 1".to_string(),
            line2: None,
            city: "Madrid".to_string(),
            region: Some("Madrid".to_string()),
            postal_code: Some("28013".to_string()),
            country: "ES".to_string(),
            is_primary: Some(true),
            latitude: Some(dec!(40.415363)),
            longitude: Some(dec!(-3.707398)),
            valid_from: NaiveDate::from_ymd_opt(2020, 1, 1),
            valid_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn email(party_id: PartyId) -> EmailContactDto {
        EmailContactDto {
            id: None,
            party_id: Some(party_id),
            email: SafeEmail().fake(),
            email_kind: EmailKind::Personal,
            is_primary: Some(true),
            is_verified: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn phone(party_id: PartyId) -> PhoneContactDto {
        PhoneContactDto {
            id: None,
            party_id: Some(party_id),
            phone_number: "+34600111222".to_string(),
            phone_kind: PhoneKind::Mobile,
            is_primary: Some(true),
            is_verified: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn identity_document(party_id: PartyId) -> IdentityDocumentDto {
        IdentityDocumentDto {
            id: None,
            party_id: Some(party_id),
            document_kind: DocumentKind::Passport,
            document_number: "PAA123456".to_string(),
            issuing_country: Some("ES".to_string()),
            issuing_authority: None,
            issue_date: NaiveDate::from_ymd_opt(2019, 5, 10),
            expiry_date: NaiveDate::from_ymd_opt(2029, 5, 10),
            is_validated: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn consent(party_id: PartyId) -> ConsentDto {
        ConsentDto {
            id: None,
            party_id: Some(party_id),
            consent_kind: ConsentKind::Marketing,
            consent_status: ConsentStatus::Granted,
            channel: Some("WEB".to_string()),
            version: Some("1.0".to_string()),
            granted_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).single(),
            revoked_at: None,
            expires_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn status(party_id: PartyId, status_code: StatusCode) -> PartyStatusDto {
        PartyStatusDto {
            id: None,
            party_id: Some(party_id),
            status_code,
            reason: None,
            valid_from: None,
            valid_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn relationship(party_id: PartyId, related_party_id: PartyId) -> PartyRelationshipDto {
        PartyRelationshipDto {
            id: None,
            party_id: Some(party_id),
            related_party_id,
            relationship_kind: RelationshipKind::Spouse,
            start_date: NaiveDate::from_ymd_opt(2015, 6, 1),
            end_date: None,
            is_active: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn group_membership(party_id: PartyId) -> PartyGroupMembershipDto {
        PartyGroupMembershipDto {
            id: None,
            party_id: Some(party_id),
            group_id: Uuid::new_v4(),
            role_in_group: Some("MEMBER".to_string()),
            joined_at: NaiveDate::from_ymd_opt(2020, 2, 29),
            left_at: None,
            is_active: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn economic_activity(party_id: PartyId) -> PartyEconomicActivityDto {
        PartyEconomicActivityDto {
            id: None,
            party_id: Some(party_id),
            activity_code: "6201".to_string(),
            description: Some("Computer programming".to_string()),
            annual_turnover: Some(dec!(1250000.50)),
            currency_code: Some("EUR".to_string()),
            is_primary: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn provider(party_id: PartyId) -> PartyProviderDto {
        PartyProviderDto {
            id: None,
            party_id: Some(party_id),
            provider_name: "Equifax".to_string(),
            external_reference: Some("EQ-99812".to_string()),
            provider_status: ProviderStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2022, 9, 1),
            end_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn politically_exposed_person(party_id: PartyId) -> PoliticallyExposedPersonDto {
        PoliticallyExposedPersonDto {
            id: None,
            party_id: Some(party_id),
            is_pep: Some(true),
            pep_category: Some(PepCategory::GovernmentOfficial),
            public_function_title: Some("Deputy minister".to_string()),
            country: Some("ES".to_string()),
            start_date: NaiveDate::from_ymd_opt(2018, 7, 1),
            end_date: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }
}
