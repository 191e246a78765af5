//! Rental properties.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{
    CreateProperty, NewProperty, Property, PropertyFilter, PropertyPatch, PropertyQuery,
    PropertySortField, UpdateProperty,
};
pub use postgres::PgPropertyRepository;
pub use repository::{InMemoryPropertyRepository, PropertyRepository};
pub use service::PropertyService;
