//! Tenants and their lease counts.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateTenant, NewTenant, Tenant, TenantPatch, TenantSortField, UpdateTenant};
pub use postgres::PgTenantRepository;
pub use repository::{InMemoryTenantRepository, TenantRepository};
pub use service::TenantService;
