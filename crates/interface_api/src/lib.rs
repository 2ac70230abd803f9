//! HTTP API Layer
//!
//! REST API of the party master data service, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one generic set of CRUD handlers, instantiated per entity
//! - **Middleware**: bearer token authentication and audit logging
//! - **Error Handling**: domain errors rendered as `{ error, message, details? }`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_party::entities::*;
use domain_party::{CrudService, Mapper, Repository};
use infra_db::{PgEntity, PgRepository};

use crate::config::ApiConfig;
use crate::handlers::{crud, health, status};
use crate::middleware::{audit_middleware, auth_middleware};

/// Produces a repository for any stored entity
pub trait RepositoryFactory {
    fn repository<E: Mapper + PgEntity>(&self) -> Arc<dyn Repository<E>>;
}

/// PostgreSQL repositories sharing one pool
#[derive(Debug, Clone)]
pub struct PostgresRepositories {
    pool: PgPool,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RepositoryFactory for PostgresRepositories {
    fn repository<E: Mapper + PgEntity>(&self) -> Arc<dyn Repository<E>> {
        Arc::new(PgRepository::<E>::new(self.pool.clone()))
    }
}

/// An entity exposed over HTTP
pub trait Resource: Mapper {
    fn service(services: &Services) -> &CrudService<Self>;
}

macro_rules! services {
    ($($field:ident: $entity:ty),+ $(,)?) => {
        /// One service per entity
        #[derive(Clone)]
        pub struct Services {
            $(pub $field: CrudService<$entity>,)+
        }

        impl Services {
            /// Builds every service over repositories from `factory`
            pub fn build(factory: &impl RepositoryFactory) -> Self {
                Self {
                    $($field: CrudService::new(factory.repository::<$entity>()),)+
                }
            }
        }

        $(
            impl Resource for $entity {
                fn service(services: &Services) -> &CrudService<Self> {
                    &services.$field
                }
            }
        )+
    };
}

services! {
    parties: Party,
    natural_persons: NaturalPerson,
    legal_entities: LegalEntity,
    addresses: Address,
    email_contacts: EmailContact,
    phone_contacts: PhoneContact,
    identity_documents: IdentityDocument,
    consents: Consent,
    party_statuses: PartyStatus,
    party_relationships: PartyRelationship,
    party_group_memberships: PartyGroupMembership,
    party_economic_activities: PartyEconomicActivity,
    party_providers: PartyProvider,
    politically_exposed_persons: PoliticallyExposedPerson,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub config: ApiConfig,
    /// Probed by the readiness check
    pub storage: Arc<dyn HealthCheckable>,
}

impl AppState {
    pub fn new(services: Services, config: ApiConfig, storage: Arc<dyn HealthCheckable>) -> Self {
        Self {
            services: Arc::new(services),
            config,
            storage,
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: ApiConfig) -> Self {
        let services = Services::build(&PostgresRepositories::new(pool.clone()));
        Self::new(services, config, Arc::new(PgRepository::<Party>::new(pool)))
    }
}

/// Routes of a resource nested under a party
fn nested<E: Resource>(segment: &str) -> Router<AppState> {
    let base = format!("/parties/:party_id/{}", segment);
    Router::new()
        .route(&base, get(crud::list_by_party::<E>).post(crud::create_nested::<E>))
        .route(&format!("{}/filter", base), post(crud::filter_nested::<E>))
        .route(
            &format!("{}/:id", base),
            get(crud::get_nested::<E>)
                .put(crud::update_nested::<E>)
                .delete(crud::delete_nested::<E>),
        )
}

/// Routes of a top-level resource
///
/// Resources sharing a path prefix must name their identifier segment alike.
fn top_level<E: Resource>(base: &str, id_param: &str) -> Router<AppState> {
    Router::new()
        .route(base, post(crud::create::<E>))
        .route(&format!("{}/filter", base), post(crud::filter::<E>))
        .route(
            &format!("{}/:{}", base, id_param),
            get(crud::get::<E>)
                .put(crud::update::<E>)
                .delete(crud::delete::<E>),
        )
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .merge(top_level::<Party>("/parties", "party_id"))
        .merge(nested::<NaturalPerson>("natural-persons"))
        .merge(nested::<LegalEntity>("legal-entities"))
        .merge(nested::<Address>("addresses"))
        .merge(nested::<EmailContact>("email-contacts"))
        .merge(nested::<PhoneContact>("phone-contacts"))
        .merge(nested::<IdentityDocument>("identity-documents"))
        .merge(nested::<Consent>("consents"))
        .merge(nested::<PartyStatus>("statuses"))
        .merge(nested::<PartyRelationship>("relationships"))
        .merge(nested::<PartyGroupMembership>("group-memberships"))
        .merge(nested::<PartyProvider>("providers"))
        .merge(nested::<PoliticallyExposedPerson>("pep"))
        .merge(top_level::<PartyEconomicActivity>("/party-economic-activities", "id"))
        .route(
            "/parties/:party_id/status",
            get(status::get_current_status).put(status::update_current_status),
        )
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
