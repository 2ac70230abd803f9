//! Mapping tests: entity and DTO conversions preserve every field

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::*;
use domain_party::entities::*;
use domain_party::*;

fn stamp() -> (Option<chrono::DateTime<Utc>>, Option<chrono::DateTime<Utc>>) {
    (
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()),
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 17, 0, 0).unwrap()),
    )
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn assert_round_trip<E: Mapper>(dto: E::Dto) {
    let entity = E::to_entity(dto.clone()).unwrap();
    assert_eq!(entity.to_dto(), dto);
    assert_eq!(entity.field_values().len(), E::FIELDS.len());
}

#[test]
fn test_party_round_trip() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<Party>(PartyDto {
        id: Some(PartyId::new()),
        party_kind: PartyKind::NaturalPerson,
        tenant_id: Some("retail".to_string()),
        preferred_language: Some("es-ES".to_string()),
        source_system: Some("CRM".to_string()),
        created_at,
        updated_at,
    });
}

#[test]
fn test_natural_person_round_trip() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<NaturalPerson>(NaturalPersonDto {
        id: Some(NaturalPersonId::new()),
        party_id: Some(PartyId::new()),
        title: Some("Dr".to_string()),
        given_name: "Lucía".to_string(),
        middle_name: None,
        family_name: "Fernández".to_string(),
        second_family_name: Some("Ruiz".to_string()),
        date_of_birth: date(1988, 4, 2),
        birth_place: Some("Valencia".to_string()),
        gender: Some(Gender::Female),
        marital_status: Some(MaritalStatus::Married),
        nationality_country: Some("ES".to_string()),
        tax_id_number: Some("12345678Z".to_string()),
        profession: Some("Architect".to_string()),
        created_at,
        updated_at,
    });
}

#[test]
fn test_legal_entity_round_trip() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<LegalEntity>(LegalEntityDto {
        id: Some(LegalEntityId::new()),
        party_id: Some(PartyId::new()),
        legal_name: "Acme Holdings S.L.".to_string(),
        trade_name: Some("Acme".to_string()),
        registration_number: Some("B12345678".to_string()),
        tax_id_number: Some("ESB12345678".to_string()),
        legal_form: Some("SL".to_string()),
        incorporation_date: date(2009, 11, 20),
        incorporation_country: Some("ES".to_string()),
        industry_description: Some("Software".to_string()),
        headcount: Some(120),
        share_capital: Some(dec!(3000.00)),
        website_url: Some("https://acme.example".to_string()),
        created_at,
        updated_at,
    });
}

#[test]
fn test_address_round_trip() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<Address>(AddressDto {
        id: Some(AddressId::new()),
        party_id: Some(PartyId::new()),
        address_kind: AddressKind::Billing,
        line1: "Gran Vía 28".to_string(),
        line2: Some("4º B".to_string()),
        city: "Madrid".to_string(),
        region: Some("Madrid".to_string()),
        postal_code: Some("28013".to_string()),
        country: "ES".to_string(),
        is_primary: Some(false),
        latitude: Some(dec!(40.4200)),
        longitude: Some(dec!(-3.7025)),
        valid_from: date(2021, 1, 1),
        valid_to: None,
        created_at,
        updated_at,
    });
}

#[test]
fn test_contact_round_trips() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<EmailContact>(EmailContactDto {
        id: Some(EmailContactId::new()),
        party_id: Some(PartyId::new()),
        email: "lucia@example.com".to_string(),
        email_kind: EmailKind::Personal,
        is_primary: Some(true),
        is_verified: Some(false),
        created_at,
        updated_at,
    });
    assert_round_trip::<PhoneContact>(PhoneContactDto {
        id: Some(PhoneContactId::new()),
        party_id: Some(PartyId::new()),
        phone_number: "+34600111222".to_string(),
        phone_kind: PhoneKind::Mobile,
        is_primary: Some(true),
        is_verified: Some(true),
        created_at,
        updated_at,
    });
}

#[test]
fn test_identity_document_round_trip() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<IdentityDocument>(IdentityDocumentDto {
        id: Some(IdentityDocumentId::new()),
        party_id: Some(PartyId::new()),
        document_kind: DocumentKind::Passport,
        document_number: "PAA123456".to_string(),
        issuing_country: Some("ES".to_string()),
        issuing_authority: Some("Policía Nacional".to_string()),
        issue_date: date(2019, 5, 10),
        expiry_date: date(2029, 5, 10),
        is_validated: Some(true),
        created_at,
        updated_at,
    });
}

#[test]
fn test_consent_and_status_round_trips() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<Consent>(ConsentDto {
        id: Some(ConsentId::new()),
        party_id: Some(PartyId::new()),
        consent_kind: ConsentKind::DataProcessing,
        consent_status: ConsentStatus::Granted,
        channel: Some("BRANCH".to_string()),
        version: Some("3.0".to_string()),
        granted_at: created_at,
        revoked_at: None,
        expires_at: updated_at,
        created_at,
        updated_at,
    });
    assert_round_trip::<PartyStatus>(PartyStatusDto {
        id: Some(PartyStatusId::new()),
        party_id: Some(PartyId::new()),
        status_code: StatusCode::Active,
        reason: Some("Onboarding complete".to_string()),
        valid_from: date(2024, 1, 15),
        valid_to: None,
        created_at,
        updated_at,
    });
}

#[test]
fn test_relationship_round_trips() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<PartyRelationship>(PartyRelationshipDto {
        id: Some(PartyRelationshipId::new()),
        party_id: Some(PartyId::new()),
        related_party_id: PartyId::new(),
        relationship_kind: RelationshipKind::BeneficialOwner,
        start_date: date(2015, 6, 1),
        end_date: None,
        is_active: Some(true),
        notes: Some("25% stake".to_string()),
        created_at,
        updated_at,
    });
    assert_round_trip::<PartyGroupMembership>(PartyGroupMembershipDto {
        id: Some(PartyGroupMembershipId::new()),
        party_id: Some(PartyId::new()),
        group_id: Uuid::new_v4(),
        role_in_group: Some("HEAD".to_string()),
        joined_at: date(2020, 2, 29),
        left_at: None,
        is_active: Some(true),
        created_at,
        updated_at,
    });
}

#[test]
fn test_activity_provider_and_pep_round_trips() {
    let (created_at, updated_at) = stamp();
    assert_round_trip::<PartyEconomicActivity>(PartyEconomicActivityDto {
        id: Some(PartyEconomicActivityId::new()),
        party_id: Some(PartyId::new()),
        activity_code: "6201".to_string(),
        description: Some("Computer programming".to_string()),
        annual_turnover: Some(dec!(1250000.50)),
        currency_code: Some("EUR".to_string()),
        is_primary: Some(true),
        created_at,
        updated_at,
    });
    assert_round_trip::<PartyProvider>(PartyProviderDto {
        id: Some(PartyProviderId::new()),
        party_id: Some(PartyId::new()),
        provider_name: "Equifax".to_string(),
        external_reference: Some("EQ-99812".to_string()),
        provider_status: ProviderStatus::Active,
        start_date: date(2022, 9, 1),
        end_date: None,
        created_at,
        updated_at,
    });
    assert_round_trip::<PoliticallyExposedPerson>(PoliticallyExposedPersonDto {
        id: Some(PoliticallyExposedPersonId::new()),
        party_id: Some(PartyId::new()),
        is_pep: Some(true),
        pep_category: Some(PepCategory::GovernmentOfficial),
        public_function_title: Some("Deputy minister".to_string()),
        country: Some("ES".to_string()),
        start_date: date(2018, 7, 1),
        end_date: date(2022, 6, 30),
        notes: None,
        created_at,
        updated_at,
    });
}

#[test]
fn test_missing_flags_read_back_false() {
    let party_id = PartyId::new();

    let mut phone = test_utils::PartyFixtures::phone(party_id);
    phone.is_primary = None;
    phone.is_verified = None;
    let dto = PhoneContact::to_entity(phone).unwrap().to_dto();
    assert_eq!(dto.is_primary, Some(false));
    assert_eq!(dto.is_verified, Some(false));

    let mut address = test_utils::PartyFixtures::address(party_id);
    address.is_primary = None;
    assert_eq!(Address::to_entity(address).unwrap().to_dto().is_primary, Some(false));

    let mut document = test_utils::PartyFixtures::identity_document(party_id);
    document.is_validated = None;
    assert_eq!(
        IdentityDocument::to_entity(document).unwrap().to_dto().is_validated,
        Some(false)
    );

    let mut pep = test_utils::PartyFixtures::politically_exposed_person(party_id);
    pep.is_pep = None;
    assert_eq!(PoliticallyExposedPerson::to_entity(pep).unwrap().to_dto().is_pep, Some(false));
}

#[test]
fn test_merge_never_touches_identity() {
    let (created_at, updated_at) = stamp();
    let party_id = PartyId::new();
    let mut entity = PoliticallyExposedPerson::to_entity(PoliticallyExposedPersonDto {
        id: Some(PoliticallyExposedPersonId::new()),
        party_id: Some(party_id),
        is_pep: Some(false),
        pep_category: None,
        public_function_title: None,
        country: None,
        start_date: None,
        end_date: None,
        notes: None,
        created_at,
        updated_at,
    })
    .unwrap();
    let before = entity.clone();

    let mut dto = entity.to_dto();
    dto.id = Some(PoliticallyExposedPersonId::new());
    dto.party_id = Some(PartyId::new());
    dto.created_at = Some(Utc::now());
    dto.is_pep = Some(true);
    entity.merge(dto);

    assert_eq!(entity.id, before.id);
    assert_eq!(entity.party_id, party_id);
    assert_eq!(entity.created_at, before.created_at);
    assert_eq!(entity.updated_at, before.updated_at);
    assert!(entity.is_pep);
}

#[test]
fn test_dto_json_shape() {
    let (created_at, updated_at) = stamp();
    let id = EmailContactId::new();
    let dto = EmailContactDto {
        id: Some(id),
        party_id: None,
        email: "a@b.com".to_string(),
        email_kind: EmailKind::Work,
        is_primary: Some(true),
        is_verified: None,
        created_at,
        updated_at,
    };

    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["id"], id.as_uuid().to_string());
    assert_eq!(json["email_kind"], "WORK");
    assert_eq!(json["created_at"], "2024-01-15T09:30:00Z");
}
