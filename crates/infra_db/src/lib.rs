//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for every party master data entity.
//!
//! # Architecture
//!
//! The domain defines one storage port, `domain_party::Repository<E>`. This
//! crate implements it once, generically, as [`PgRepository`]:
//!
//! - [`rows`] maps each entity to its table and decodes rows
//! - [`query`] renders validated filter queries and upserts with bind parameters
//! - [`pool`] opens the connection pool and applies embedded migrations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PgRepository};
//! use domain_party::entities::Address;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/party_master")).await?;
//! run_migrations(&pool).await?;
//! let addresses = PgRepository::<Address>::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod query;
pub mod repository;
pub mod rows;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool, MIGRATOR};
pub use repository::PgRepository;
pub use rows::{PgEntity, TABLES};
