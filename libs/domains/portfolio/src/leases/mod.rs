//! Leases and the overlap guard that protects them.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{
    CreateLease, Lease, LeaseFilter, LeasePatch, LeaseQuery, LeaseSortField, NewLease, UpdateLease,
};
pub use postgres::PgLeaseRepository;
pub use repository::{InMemoryLeaseRepository, LeaseRepository};
pub use service::LeaseService;
