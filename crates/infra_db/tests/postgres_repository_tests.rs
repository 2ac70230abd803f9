//! PostgreSQL repository tests
//!
//! These start a PostgreSQL container and need Docker:
//! `cargo test -p infra_db -- --ignored`

use std::sync::Arc;

use chrono::Utc;

use core_kernel::*;
use domain_party::entities::*;
use domain_party::*;
use infra_db::PgRepository;
use test_utils::{create_isolated_test_database, PartyFixtures, TestDatabase};

async fn database() -> TestDatabase {
    create_isolated_test_database()
        .await
        .expect("Failed to start test database")
}

async fn stored_party(db: &TestDatabase) -> Party {
    let service = CrudService::<Party>::new(Arc::new(PgRepository::<Party>::new(db.pool.clone())));
    let dto = service
        .create(None, PartyFixtures::party(PartyKind::NaturalPerson))
        .await
        .unwrap();
    Party::to_entity(dto).unwrap()
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_save_and_find_round_trip() {
    let db = database().await;
    let party = stored_party(&db).await;
    let repository = PgRepository::<Address>::new(db.pool.clone());

    let mut address = Address::to_entity(PartyFixtures::address(party.id)).unwrap();
    address.init_metadata(Address::new_id(), Utc::now());
    let saved = repository.save(&address).await.unwrap();

    let found = repository.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found, saved);
    assert_eq!(found.latitude, PartyFixtures::address(party.id).latitude);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_save_twice_updates_in_place() {
    let db = database().await;
    let party = stored_party(&db).await;
    let repository = PgRepository::<Address>::new(db.pool.clone());

    let mut address = Address::to_entity(PartyFixtures::address(party.id)).unwrap();
    address.init_metadata(Address::new_id(), Utc::now());
    let first = repository.save(&address).await.unwrap();

    address.city = "Bilbao".to_string();
    address.touch(Utc::now());
    repository.save(&address).await.unwrap();

    let rows = repository.find_by_party_id(party.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].city, "Bilbao");
    assert_eq!(rows[0].created_at, first.created_at);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_child_of_unknown_party_is_a_conflict() {
    let db = database().await;
    let repository = PgRepository::<EmailContact>::new(db.pool.clone());

    let mut email = EmailContact::to_entity(PartyFixtures::email(PartyId::new())).unwrap();
    email.init_metadata(EmailContact::new_id(), Utc::now());
    let result = repository.save(&email).await;

    assert!(matches!(result, Err(PortError::Conflict { .. })));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_filter_pages_and_counts() {
    let db = database().await;
    let party = stored_party(&db).await;
    let service = CrudService::<PhoneContact>::new(Arc::new(PgRepository::<PhoneContact>::new(
        db.pool.clone(),
    )));

    for i in 0..5 {
        let mut dto = PartyFixtures::phone(party.id);
        dto.phone_number = format!("+3460000000{}", i);
        dto.phone_kind = if i % 2 == 0 { PhoneKind::Mobile } else { PhoneKind::Work };
        service.create(Some(party.id), dto).await.unwrap();
    }

    let request = FilterRequest::new()
        .with(FilterCriterion::equals("phone_kind", "MOBILE"))
        .sort("phone_number", SortDirection::Asc)
        .page(0, 2);
    let page = service.filter(None, &request).await.unwrap();

    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].phone_number, "+34600000000");
    assert_eq!(page.content[1].phone_number, "+34600000002");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_contains_escapes_wildcards() {
    let db = database().await;
    let party = stored_party(&db).await;
    let service = CrudService::<PartyProvider>::new(Arc::new(PgRepository::<PartyProvider>::new(
        db.pool.clone(),
    )));

    for name in ["Rate_100%", "Rate 1000"] {
        let mut dto = PartyFixtures::provider(party.id);
        dto.provider_name = name.to_string();
        service.create(Some(party.id), dto).await.unwrap();
    }

    let page = service
        .filter(None, &FilterRequest::new().with(FilterCriterion::contains("provider_name", "e_1")))
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].provider_name, "Rate_100%");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_party_with_children_cannot_be_deleted() {
    let db = database().await;
    let party = stored_party(&db).await;
    let parties = CrudService::<Party>::new(Arc::new(PgRepository::<Party>::new(db.pool.clone())));
    let statuses = CrudService::<PartyStatus>::new(Arc::new(PgRepository::<PartyStatus>::new(
        db.pool.clone(),
    )));

    statuses
        .create(Some(party.id), PartyFixtures::status(party.id, StatusCode::Active))
        .await
        .unwrap();
    let result = parties.delete(None, party.id).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::PersistenceFailure);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check_reports_healthy() {
    let db = database().await;
    let repository = PgRepository::<Consent>::new(db.pool.clone());

    let health = repository.health_check().await;
    assert!(health.is_healthy());
    assert_eq!(health.adapter_id, "postgres-consents");
}
