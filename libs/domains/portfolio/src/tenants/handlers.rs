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

use super::models::{CreateTenant, Tenant, UpdateTenant};
use super::repository::TenantRepository;
use super::service::TenantService;
use crate::error::PortfolioResult;
use crate::listing::SortParams;

const TAG: &str = "tenants";

/// OpenAPI documentation for the tenants API
#[derive(OpenApi)]
#[openapi(
    paths(list_tenants, create_tenant, get_tenant, update_tenant, delete_tenant),
    components(
        schemas(Tenant, CreateTenant, UpdateTenant, MutationResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Tenants")
    )
)]
pub struct ApiDoc;

pub fn router<R: TenantRepository + 'static>(service: TenantService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route(
            "/{id}",
            get(get_tenant).put(update_tenant).delete(delete_tenant),
        )
        .with_state(shared_service)
}

/// List tenants with their lease counts
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(SortParams),
    responses(
        (status = 200, description = "List of tenants", body = ApiResponse<Vec<Tenant>>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_tenants<R: TenantRepository>(
    State(service): State<Arc<TenantService<R>>>,
    Query(params): Query<SortParams>,
) -> PortfolioResult<ApiResponse<Vec<Tenant>>> {
    let tenants = service.list_tenants(params).await?;
    Ok(ApiResponse::new(tenants))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTenant,
    responses(
        (status = 201, description = "Tenant created successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn create_tenant<R: TenantRepository>(
    State(service): State<Arc<TenantService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTenant>,
) -> PortfolioResult<Created<MutationResult>> {
    let id = service.create_tenant(input).await?;
    Ok(MutationResult::created(id, "Tenant created successfully"))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant found", body = ApiResponse<Tenant>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_tenant<R: TenantRepository>(
    State(service): State<Arc<TenantService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<Tenant>> {
    let tenant = service.get_tenant(id).await?;
    Ok(ApiResponse::new(tenant))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Tenant id")),
    request_body = UpdateTenant,
    responses(
        (status = 200, description = "Tenant updated successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_tenant<R: TenantRepository>(
    State(service): State<Arc<TenantService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTenant>,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.update_tenant(id, input).await?;
    Ok(MutationResult::done("Tenant updated successfully"))
}

/// Delete a tenant; refused while they hold leases
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant deleted successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_tenant<R: TenantRepository>(
    State(service): State<Arc<TenantService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.delete_tenant(id).await?;
    Ok(MutationResult::done("Tenant deleted successfully"))
}
