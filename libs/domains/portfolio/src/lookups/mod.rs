//! Reference tables: property types and statuses, payment and maintenance statuses.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{Lookup, LookupInput, LookupKind, LookupSortField};
pub use postgres::PgLookupRepository;
pub use repository::{InMemoryLookupRepository, LookupRepository};
pub use service::LookupService;
