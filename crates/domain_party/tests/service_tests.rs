//! Tests for the generic CRUD service against the in-memory repository

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use core_kernel::{
    AddressId, ConsentId, FilterCriterion, FilterOperator, FilterRequest, PartyId, PartyStatusId,
    SortDirection,
};
use domain_party::entities::{
    Address, AddressDto, Consent, ConsentDto, Party, PartyDto, PartyEconomicActivity,
    PartyEconomicActivityDto, PartyStatus, PartyStatusDto,
};
use domain_party::{
    AddressKind, ConsentKind, ConsentStatus, CrudService, ErrorKind, InMemoryRepository, PartyError,
    PartyKind, StatusCode,
};

fn address_dto(city: &str) -> AddressDto {
    AddressDto {
        id: None,
        party_id: None,
        address_kind: AddressKind::Home,
        line1: "1 Main Street".to_string(),
        line2: None,
        city: city.to_string(),
        region: None,
        postal_code: Some("10001".to_string()),
        country: "US".to_string(),
        is_primary: Some(true),
        latitude: None,
        longitude: None,
        valid_from: None,
        valid_to: None,
        created_at: None,
        updated_at: None,
    }
}

fn consent_dto() -> ConsentDto {
    ConsentDto {
        id: None,
        party_id: None,
        consent_kind: ConsentKind::Marketing,
        consent_status: ConsentStatus::Granted,
        channel: Some("WEB".to_string()),
        version: None,
        granted_at: Some(Utc::now()),
        revoked_at: None,
        expires_at: None,
        created_at: None,
        updated_at: None,
    }
}

fn status_dto(code: StatusCode) -> PartyStatusDto {
    PartyStatusDto {
        id: None,
        party_id: None,
        status_code: code,
        reason: None,
        valid_from: None,
        valid_to: None,
        created_at: None,
        updated_at: None,
    }
}

fn address_service() -> (Arc<InMemoryRepository<Address>>, CrudService<Address>) {
    let repository = Arc::new(InMemoryRepository::<Address>::new());
    let service = CrudService::<Address>::new(repository.clone());
    (repository, service)
}

// ============================================================================
// Create / read
// ============================================================================

mod create_and_get {
    use super::*;

    #[tokio::test]
    async fn test_create_saves_once_and_assigns_metadata() {
        let (repository, service) = address_service();
        let party = PartyId::new();

        let created = service.create(Some(party), address_dto("Boston")).await.unwrap();

        assert_eq!(repository.save_count(), 1);
        assert!(created.id.is_some());
        assert_eq!(created.party_id, Some(party));
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_ignores_client_supplied_id() {
        let (_, service) = address_service();
        let client_id = AddressId::new();
        let mut dto = address_dto("Boston");
        dto.id = Some(client_id);

        let created = service.create(Some(PartyId::new()), dto).await.unwrap();
        assert_ne!(created.id, Some(client_id));
    }

    #[tokio::test]
    async fn test_path_party_wins_over_body() {
        let (_, service) = address_service();
        let path_party = PartyId::new();
        let mut dto = address_dto("Boston");
        dto.party_id = Some(PartyId::new());

        let created = service.create(Some(path_party), dto).await.unwrap();
        assert_eq!(created.party_id, Some(path_party));
    }

    #[tokio::test]
    async fn test_create_party_root() {
        let repository = Arc::new(InMemoryRepository::<Party>::new());
        let service = CrudService::<Party>::new(repository.clone());

        let created = service
            .create(
                None,
                PartyDto {
                    id: None,
                    party_kind: PartyKind::LegalEntity,
                    tenant_id: Some("acme".to_string()),
                    preferred_language: Some("en".to_string()),
                    source_system: None,
                    created_at: None,
                    updated_at: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.party_kind, PartyKind::LegalEntity);
        assert_eq!(repository.save_count(), 1);
    }

    #[tokio::test]
    async fn test_top_level_create_requires_party_in_body() {
        let repository = Arc::new(InMemoryRepository::<PartyEconomicActivity>::new());
        let service = CrudService::<PartyEconomicActivity>::new(repository.clone());

        let result = service
            .create(
                None,
                PartyEconomicActivityDto {
                    id: None,
                    party_id: None,
                    activity_code: "6201".to_string(),
                    description: None,
                    annual_turnover: None,
                    currency_code: None,
                    is_primary: None,
                    created_at: None,
                    updated_at: None,
                },
            )
            .await;

        assert!(matches!(result, Err(PartyError::InvalidRequest(_))));
        assert_eq!(repository.save_count(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_, service) = address_service();
        let id = AddressId::new();

        let error = service.get(None, id).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(
            error.to_string(),
            format!("Address not found with ID: {}", id.as_uuid())
        );
    }

    #[tokio::test]
    async fn test_address_ownership_on_get() {
        let (_, service) = address_service();
        let owner = PartyId::new();
        let other = PartyId::new();
        let created = service.create(Some(owner), address_dto("Boston")).await.unwrap();
        let id = created.id.unwrap();

        let error = service.get(Some(other), id).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OwnershipMismatch);
        assert_eq!(
            error.to_string(),
            format!(
                "Address with ID {} does not belong to party {}",
                id.as_uuid(),
                other.as_uuid()
            )
        );

        let fetched = service.get(Some(owner), id).await.unwrap();
        assert_eq!(fetched, created);
    }
}

// ============================================================================
// Update / delete
// ============================================================================

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn test_update_missing_never_saves() {
        let (repository, service) = address_service();

        let result = service
            .update(Some(PartyId::new()), AddressId::new(), address_dto("Boston"))
            .await;

        assert!(matches!(result, Err(PartyError::NotFound { .. })));
        assert_eq!(repository.save_count(), 0);
    }

    #[tokio::test]
    async fn test_update_wrong_owner_never_saves() {
        let (repository, service) = address_service();
        let created = service
            .create(Some(PartyId::new()), address_dto("Boston"))
            .await
            .unwrap();

        let result = service
            .update(Some(PartyId::new()), created.id.unwrap(), address_dto("Denver"))
            .await;

        assert!(matches!(result, Err(PartyError::OwnershipMismatch { .. })));
        assert_eq!(repository.save_count(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_identity() {
        let (repository, service) = address_service();
        let party = PartyId::new();
        let created = service.create(Some(party), address_dto("Boston")).await.unwrap();

        let mut changes = address_dto("Denver");
        changes.postal_code = None;
        changes.id = Some(AddressId::new());
        let updated = service
            .update(Some(party), created.id.unwrap(), changes)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.city, "Denver");
        assert_eq!(updated.postal_code.as_deref(), Some("10001"));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(repository.save_count(), 2);
    }

    #[tokio::test]
    async fn test_unchecked_entity_ignores_path_party() {
        let repository = Arc::new(InMemoryRepository::<Consent>::new());
        let service = CrudService::<Consent>::new(repository.clone());
        let owner = PartyId::new();
        let created = service.create(Some(owner), consent_dto()).await.unwrap();

        let mut changes = consent_dto();
        changes.consent_status = ConsentStatus::Revoked;
        let updated = service
            .update(Some(PartyId::new()), created.id.unwrap(), changes)
            .await
            .unwrap();

        assert_eq!(updated.consent_status, ConsentStatus::Revoked);
        assert_eq!(updated.party_id, Some(owner));
    }

    #[tokio::test]
    async fn test_unchecked_entity_takes_party_from_body() {
        let repository = Arc::new(InMemoryRepository::<Consent>::new());
        let service = CrudService::<Consent>::new(repository.clone());
        let created = service.create(Some(PartyId::new()), consent_dto()).await.unwrap();

        let new_owner = PartyId::new();
        let mut changes = consent_dto();
        changes.party_id = Some(new_owner);
        let updated = service
            .update(None, created.id.unwrap(), changes)
            .await
            .unwrap();

        assert_eq!(updated.party_id, Some(new_owner));
    }

    #[tokio::test]
    async fn test_delete_missing_never_deletes() {
        let repository = Arc::new(InMemoryRepository::<Consent>::new());
        let service = CrudService::<Consent>::new(repository.clone());

        let result = service.delete(Some(PartyId::new()), ConsentId::new()).await;

        assert!(matches!(result, Err(PartyError::NotFound { .. })));
        assert_eq!(repository.delete_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_wrong_owner_never_deletes() {
        let (repository, service) = address_service();
        let created = service
            .create(Some(PartyId::new()), address_dto("Boston"))
            .await
            .unwrap();

        let result = service.delete(Some(PartyId::new()), created.id.unwrap()).await;

        assert!(matches!(result, Err(PartyError::OwnershipMismatch { .. })));
        assert_eq!(repository.delete_count(), 0);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (repository, service) = address_service();
        let party = PartyId::new();
        let created = service.create(Some(party), address_dto("Boston")).await.unwrap();
        let id = created.id.unwrap();

        service.delete(Some(party), id).await.unwrap();

        assert_eq!(repository.delete_count(), 1);
        assert!(repository.is_empty().await);
        assert!(matches!(
            service.get(Some(party), id).await,
            Err(PartyError::NotFound { .. })
        ));
    }
}

// ============================================================================
// List and filter
// ============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_list_by_party_only_returns_owned_rows() {
        let (_, service) = address_service();
        let party = PartyId::new();
        service.create(Some(party), address_dto("Boston")).await.unwrap();
        service.create(Some(party), address_dto("Austin")).await.unwrap();
        service.create(Some(PartyId::new()), address_dto("Denver")).await.unwrap();

        let rows = service.list_by_party(party).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.party_id == Some(party)));
    }

    #[tokio::test]
    async fn test_filter_pages_and_sorts() {
        let (_, service) = address_service();
        let party = PartyId::new();
        for city in ["Boston", "Austin", "Chicago", "Denver", "El Paso"] {
            service.create(Some(party), address_dto(city)).await.unwrap();
        }

        let request = FilterRequest::new()
            .sort("city", SortDirection::Asc)
            .page(1, 2);
        let page = service.filter(None, &request).await.unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        let cities: Vec<_> = page.content.iter().map(|a| a.city.as_str()).collect();
        assert_eq!(cities, ["Chicago", "Denver"]);
    }

    #[tokio::test]
    async fn test_filter_is_not_scoped_by_path_party() {
        let (_, service) = address_service();
        service.create(Some(PartyId::new()), address_dto("Boston")).await.unwrap();
        service.create(Some(PartyId::new()), address_dto("Boston")).await.unwrap();

        let request = FilterRequest::new().with(FilterCriterion::equals("city", "Boston"));
        let page = service.filter(Some(PartyId::new()), &request).await.unwrap();

        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_filter_by_party_criterion() {
        let (_, service) = address_service();
        let party = PartyId::new();
        service.create(Some(party), address_dto("Boston")).await.unwrap();
        service.create(Some(PartyId::new()), address_dto("Boston")).await.unwrap();

        let request = FilterRequest::new().with(FilterCriterion::equals(
            "party_id",
            party.as_uuid().to_string(),
        ));
        let page = service.filter(None, &request).await.unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].party_id, Some(party));
    }

    #[tokio::test]
    async fn test_filter_rejects_unknown_field() {
        let (_, service) = address_service();
        let request = FilterRequest::new().with(FilterCriterion::new(
            "street",
            FilterOperator::Equals,
            Some(json!("x")),
        ));

        let error = service.filter(None, &request).await.unwrap_err();
        assert!(matches!(error, PartyError::InvalidFilter(_)));
        assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    }
}

// ============================================================================
// Party status by owner
// ============================================================================

mod party_status {
    use super::*;

    #[tokio::test]
    async fn test_update_by_party_without_status_never_saves() {
        let repository = Arc::new(InMemoryRepository::<PartyStatus>::new());
        let service = CrudService::<PartyStatus>::new(repository.clone());
        let party = PartyId::new();

        let error = service
            .update_by_party(party, status_dto(StatusCode::Blocked))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Party status not found for party ID: {}", party.as_uuid())
        );
        assert_eq!(repository.save_count(), 0);
    }

    #[tokio::test]
    async fn test_get_by_party_returns_latest() {
        let party = PartyId::new();
        let now = Utc::now();
        let older = PartyStatus {
            id: PartyStatusId::new(),
            party_id: party,
            status_code: StatusCode::Prospect,
            reason: None,
            valid_from: None,
            valid_to: None,
            created_at: now - chrono::Duration::days(10),
            updated_at: now - chrono::Duration::days(10),
        };
        let newer = PartyStatus {
            id: PartyStatusId::new(),
            status_code: StatusCode::Active,
            created_at: now,
            updated_at: now,
            ..older.clone()
        };
        let repository = Arc::new(InMemoryRepository::with_entities(vec![older, newer.clone()]).await);
        let service = CrudService::<PartyStatus>::new(repository);

        let current = service.get_by_party(party).await.unwrap();
        assert_eq!(current.id, Some(newer.id));
        assert_eq!(current.status_code, StatusCode::Active);
    }

    #[tokio::test]
    async fn test_update_by_party_changes_current_status() {
        let repository = Arc::new(InMemoryRepository::<PartyStatus>::new());
        let service = CrudService::<PartyStatus>::new(repository.clone());
        let party = PartyId::new();
        service
            .create(Some(party), status_dto(StatusCode::Active))
            .await
            .unwrap();

        let mut changes = status_dto(StatusCode::Blocked);
        changes.reason = Some("Fraud review".to_string());
        let updated = service.update_by_party(party, changes).await.unwrap();

        assert_eq!(updated.status_code, StatusCode::Blocked);
        assert_eq!(updated.reason.as_deref(), Some("Fraud review"));
        assert_eq!(repository.save_count(), 2);
    }
}
