//! Database plumbing shared by the portal services.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL via SeaORM: connector, migrations, health
//!   check, [`postgres::UnitOfWork`] and constraint-violation classification
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::{common::RetryConfig, postgres};
//! use migration::Migrator;
//!
//! let config = postgres::PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config, RetryConfig::startup()).await?;
//! postgres::run_migrations::<Migrator>(&db, "portal_api").await?;
//!
//! let uow = postgres::UnitOfWork::begin(&db).await?;
//! let outcome = do_writes(uow.conn()).await;
//! uow.finish(outcome).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
