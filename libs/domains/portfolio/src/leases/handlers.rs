use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{
    ApiResponse, Created, IdPath, MutationResult, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::models::{CreateLease, Lease, LeaseFilter, UpdateLease};
use super::repository::LeaseRepository;
use super::service::LeaseService;
use crate::error::PortfolioResult;

const TAG: &str = "leases";

/// OpenAPI documentation for the leases API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_leases,
        create_lease,
        get_lease,
        update_lease,
        delete_lease,
        list_tenant_leases,
        list_property_leases
    ),
    components(
        schemas(Lease, CreateLease, UpdateLease, MutationResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Leases; terms on one property never overlap")
    )
)]
pub struct ApiDoc;

/// Create the lease router with all HTTP endpoints
pub fn router<R: LeaseRepository + 'static>(service: LeaseService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_leases).post(create_lease))
        .route(
            "/{id}",
            get(get_lease).put(update_lease).delete(delete_lease),
        )
        .route("/tenant/{tenant_id}", get(list_tenant_leases))
        .route("/property/{property_id}", get(list_property_leases))
        .with_state(shared_service)
}

/// List leases with optional payment status filter and sorting
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(LeaseFilter),
    responses(
        (status = 200, description = "List of leases", body = ApiResponse<Vec<Lease>>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_leases<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    Query(filter): Query<LeaseFilter>,
) -> PortfolioResult<ApiResponse<Vec<Lease>>> {
    let leases = service.list_leases(filter).await?;
    Ok(ApiResponse::new(leases))
}

/// Create a lease; rejected when its term overlaps another lease on the property
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateLease,
    responses(
        (status = 201, description = "Lease created successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_lease<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateLease>,
) -> PortfolioResult<Created<MutationResult>> {
    let id = service.create_lease(input).await?;
    Ok(MutationResult::created(id, "Lease created successfully"))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lease id")),
    responses(
        (status = 200, description = "Lease found", body = ApiResponse<Lease>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_lease<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<Lease>> {
    let lease = service.get_lease(id).await?;
    Ok(ApiResponse::new(lease))
}

/// Update a lease; the merged term is checked for overlap
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lease id")),
    request_body = UpdateLease,
    responses(
        (status = 200, description = "Lease updated successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_lease<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateLease>,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.update_lease(id, input).await?;
    Ok(MutationResult::done("Lease updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lease id")),
    responses(
        (status = 200, description = "Lease deleted successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_lease<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.delete_lease(id).await?;
    Ok(MutationResult::done("Lease deleted successfully"))
}

/// Leases held by one tenant
#[utoipa::path(
    get,
    path = "/tenant/{tenant_id}",
    tag = TAG,
    params(("tenant_id" = i32, Path, description = "Tenant id"), LeaseFilter),
    responses(
        (status = 200, description = "Leases of the tenant", body = ApiResponse<Vec<Lease>>),
        (status = 400, response = BadRequestIdResponse)
    )
)]
async fn list_tenant_leases<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    IdPath(tenant_id): IdPath,
    Query(filter): Query<LeaseFilter>,
) -> PortfolioResult<ApiResponse<Vec<Lease>>> {
    let leases = service.list_by_tenant(tenant_id, filter).await?;
    Ok(ApiResponse::new(leases))
}

/// Leases on one property
#[utoipa::path(
    get,
    path = "/property/{property_id}",
    tag = TAG,
    params(("property_id" = i32, Path, description = "Property id"), LeaseFilter),
    responses(
        (status = 200, description = "Leases on the property", body = ApiResponse<Vec<Lease>>),
        (status = 400, response = BadRequestIdResponse)
    )
)]
async fn list_property_leases<R: LeaseRepository>(
    State(service): State<Arc<LeaseService<R>>>,
    IdPath(property_id): IdPath,
    Query(filter): Query<LeaseFilter>,
) -> PortfolioResult<ApiResponse<Vec<Lease>>> {
    let leases = service.list_by_property(property_id, filter).await?;
    Ok(ApiResponse::new(leases))
}
