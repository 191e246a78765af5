use axum::Router;
use domain_portfolio::LookupKind;

pub mod health;
pub mod portfolio;

/// Creates the API routes, one prefix per resource.
/// `create_router` merges them at the root next to the docs.
pub fn routes(state: &crate::state::AppState) -> Router {
    let mut router = Router::new()
        .nest("/properties", portfolio::properties(state))
        .nest("/tenants", portfolio::tenants(state))
        .nest("/leases", portfolio::leases(state))
        .nest("/maintenance", portfolio::maintenance(state));

    for kind in LookupKind::ALL {
        router = router.nest(kind.path(), portfolio::lookup(state, kind));
    }
    router
}

/// Creates a router with the /ready endpoint that pings the database.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
