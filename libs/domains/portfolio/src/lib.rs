//! Portfolio Domain
//!
//! Properties, tenants, leases and maintenance tasks, plus the four lookup
//! tables they reference (property types and statuses, payment and
//! maintenance statuses).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, one router per resource
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Input checks, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Postgres (unit of work) or in-memory; guards run here
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Guards    │  ← Lease overlap, delete-with-dependents
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_portfolio::{
//!     InMemoryStore,
//!     leases::{self, InMemoryLeaseRepository, LeaseService},
//! };
//!
//! // Every in-memory repository built from one store sees the same tables
//! let store = InMemoryStore::new();
//! let service = LeaseService::new(InMemoryLeaseRepository::new(store.clone()));
//!
//! let router = leases::handlers::router(service);
//! ```

pub mod error;
pub mod guard;
pub mod input;
pub mod leases;
pub mod listing;
pub mod lookups;
pub mod maintenance;
pub mod properties;
pub mod store;
pub mod tenants;

// Re-export commonly used types
pub use error::{PortfolioError, PortfolioResult};
pub use guard::{BookedLease, DateRange, find_conflicting_lease, leases_overlap};
pub use listing::{Sort, SortOrder, SortParams};
pub use lookups::{LookupKind, LookupService};
pub use store::InMemoryStore;
