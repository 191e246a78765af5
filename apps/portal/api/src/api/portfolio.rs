//! Postgres-backed routers for every portfolio resource.

use axum::Router;
use domain_portfolio::{
    LookupKind, LookupService,
    leases::{self, LeaseService, PgLeaseRepository},
    lookups::{self, PgLookupRepository},
    maintenance::{self, MaintenanceService, PgMaintenanceRepository},
    properties::{self, PgPropertyRepository, PropertyService},
    tenants::{self, PgTenantRepository, TenantService},
};

use crate::state::AppState;

pub fn properties(state: &AppState) -> Router {
    let repository = PgPropertyRepository::new(state.db.clone());
    properties::handlers::router(PropertyService::new(repository))
}

pub fn tenants(state: &AppState) -> Router {
    let repository = PgTenantRepository::new(state.db.clone());
    tenants::handlers::router(TenantService::new(repository))
}

pub fn leases(state: &AppState) -> Router {
    let repository = PgLeaseRepository::new(state.db.clone());
    leases::handlers::router(LeaseService::new(repository))
}

pub fn maintenance(state: &AppState) -> Router {
    let repository = PgMaintenanceRepository::new(state.db.clone());
    maintenance::handlers::router(MaintenanceService::new(repository))
}

pub fn lookup(state: &AppState, kind: LookupKind) -> Router {
    let repository = PgLookupRepository::new(state.db.clone());
    lookups::handlers::router(LookupService::new(kind, repository))
}
