//! Lifecycle rules checked against every entity type

use std::sync::Arc;

use core_kernel::PartyId;
use domain_party::entities::*;
use domain_party::{
    CrudService, Entity, ErrorKind, InMemoryRepository, Mapper, Ownership, PartyKind, StatusCode,
};
use test_utils::PartyFixtures;

fn service_for<E: Mapper>() -> (Arc<InMemoryRepository<E>>, CrudService<E>) {
    let repository = Arc::new(InMemoryRepository::<E>::new());
    let service = CrudService::<E>::new(repository.clone());
    (repository, service)
}

/// A record created under one party is invisible and immutable through another
async fn assert_ownership_enforced<E: Mapper>(dto: E::Dto) {
    assert_eq!(E::OWNERSHIP, Ownership::Enforced, "{}", E::LABEL);

    let (repository, service) = service_for::<E>();
    let owner = PartyId::new();
    let other = PartyId::new();
    let created = service.create(Some(owner), dto.clone()).await.unwrap();
    let id = E::to_entity(created.clone()).unwrap().id();

    let error = service.get(Some(other), id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::OwnershipMismatch, "{} get", E::LABEL);

    let error = service.update(Some(other), id, dto).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::OwnershipMismatch, "{} update", E::LABEL);
    assert_eq!(repository.save_count(), 1, "{} update saved", E::LABEL);

    let error = service.delete(Some(other), id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::OwnershipMismatch, "{} delete", E::LABEL);
    assert_eq!(repository.delete_count(), 0, "{} delete removed", E::LABEL);

    assert_eq!(service.get(Some(owner), id).await.unwrap(), created);
}

/// Operations on an unknown id fail without touching storage
async fn assert_missing_rejected<E: Mapper>(party_id: Option<PartyId>, dto: E::Dto) {
    let (repository, service) = service_for::<E>();
    let id = E::new_id();

    let error = service.get(party_id, id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound, "{} get", E::LABEL);
    assert_eq!(
        error.to_string(),
        format!("{} not found with ID: {}", E::LABEL, Into::<uuid::Uuid>::into(id))
    );

    let error = service.update(party_id, id, dto).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound, "{} update", E::LABEL);
    assert_eq!(repository.save_count(), 0, "{} update saved", E::LABEL);

    let error = service.delete(party_id, id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound, "{} delete", E::LABEL);
    assert_eq!(repository.delete_count(), 0, "{} delete removed", E::LABEL);
}

mod ownership {
    use super::*;

    #[tokio::test]
    async fn test_natural_person_is_owned() {
        assert_ownership_enforced::<NaturalPerson>(PartyFixtures::natural_person(PartyId::new())).await;
    }

    #[tokio::test]
    async fn test_legal_entity_is_owned() {
        assert_ownership_enforced::<LegalEntity>(PartyFixtures::legal_entity(PartyId::new())).await;
    }

    #[tokio::test]
    async fn test_address_is_owned() {
        assert_ownership_enforced::<Address>(PartyFixtures::address(PartyId::new())).await;
    }

    #[tokio::test]
    async fn test_email_contact_is_owned() {
        assert_ownership_enforced::<EmailContact>(PartyFixtures::email(PartyId::new())).await;
    }

    #[tokio::test]
    async fn test_phone_contact_is_owned() {
        assert_ownership_enforced::<PhoneContact>(PartyFixtures::phone(PartyId::new())).await;
    }

    #[tokio::test]
    async fn test_politically_exposed_person_is_owned() {
        assert_ownership_enforced::<PoliticallyExposedPerson>(
            PartyFixtures::politically_exposed_person(PartyId::new()),
        )
        .await;
    }

    #[test]
    fn test_remaining_children_are_unchecked() {
        assert_eq!(Party::OWNERSHIP, Ownership::Root);
        for ownership in [
            IdentityDocument::OWNERSHIP,
            Consent::OWNERSHIP,
            PartyStatus::OWNERSHIP,
            PartyRelationship::OWNERSHIP,
            PartyGroupMembership::OWNERSHIP,
            PartyEconomicActivity::OWNERSHIP,
            PartyProvider::OWNERSHIP,
        ] {
            assert_eq!(ownership, Ownership::Unchecked);
        }
    }
}

mod missing_ids {
    use super::*;

    #[tokio::test]
    async fn test_party() {
        assert_missing_rejected::<Party>(None, PartyFixtures::party(PartyKind::LegalEntity)).await;
    }

    #[tokio::test]
    async fn test_party_children() {
        let p = PartyId::new();
        let path = Some(p);

        assert_missing_rejected::<NaturalPerson>(path, PartyFixtures::natural_person(p)).await;
        assert_missing_rejected::<LegalEntity>(path, PartyFixtures::legal_entity(p)).await;
        assert_missing_rejected::<Address>(path, PartyFixtures::address(p)).await;
        assert_missing_rejected::<EmailContact>(path, PartyFixtures::email(p)).await;
        assert_missing_rejected::<PhoneContact>(path, PartyFixtures::phone(p)).await;
        assert_missing_rejected::<IdentityDocument>(path, PartyFixtures::identity_document(p)).await;
        assert_missing_rejected::<Consent>(path, PartyFixtures::consent(p)).await;
        assert_missing_rejected::<PartyStatus>(path, PartyFixtures::status(p, StatusCode::Active)).await;
        assert_missing_rejected::<PartyRelationship>(
            path,
            PartyFixtures::relationship(p, PartyId::new()),
        )
        .await;
        assert_missing_rejected::<PartyGroupMembership>(path, PartyFixtures::group_membership(p)).await;
        assert_missing_rejected::<PartyProvider>(path, PartyFixtures::provider(p)).await;
        assert_missing_rejected::<PoliticallyExposedPerson>(
            path,
            PartyFixtures::politically_exposed_person(p),
        )
        .await;
    }

    #[tokio::test]
    async fn test_economic_activity() {
        let p = PartyId::new();
        assert_missing_rejected::<PartyEconomicActivity>(None, PartyFixtures::economic_activity(p)).await;
    }
}
