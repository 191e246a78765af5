//! Maintenance tasks scheduled on properties.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{
    CreateMaintenance, Maintenance, MaintenanceFilter, MaintenancePatch, MaintenanceQuery,
    MaintenanceSortField, NewMaintenance, UpdateMaintenance,
};
pub use postgres::PgMaintenanceRepository;
pub use repository::{InMemoryMaintenanceRepository, MaintenanceRepository};
pub use service::MaintenanceService;
