//! PostgreSQL connector, migrations, health, and write scoping.

mod config;
mod connector;
mod constraint;
mod health;
mod unit_of_work;

pub use config::PostgresConfig;
pub use connector::{connect, connect_with_retry, run_migrations};
pub use constraint::{ConstraintViolation, constraint_violation};
pub use health::check_health;
pub use unit_of_work::UnitOfWork;

// Re-export SeaORM types for convenience
pub use sea_orm::{DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
