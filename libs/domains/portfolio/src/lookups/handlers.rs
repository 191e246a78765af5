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

use super::models::{Lookup, LookupInput};
use super::repository::LookupRepository;
use super::service::LookupService;
use crate::error::PortfolioResult;
use crate::listing::SortParams;

const TAG: &str = "lookups";

/// OpenAPI documentation shared by the four lookup mounts
#[derive(OpenApi)]
#[openapi(
    paths(list_lookups, create_lookup, get_lookup, update_lookup, delete_lookup),
    components(
        schemas(Lookup, LookupInput, MutationResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Property types and statuses, payment and maintenance statuses")
    )
)]
pub struct ApiDoc;

/// Router for one lookup table; mount it at `LookupKind::path()`
pub fn router<R: LookupRepository + 'static>(service: LookupService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_lookups).post(create_lookup))
        .route(
            "/{id}",
            get(get_lookup).put(update_lookup).delete(delete_lookup),
        )
        .with_state(shared_service)
}

/// List lookup values
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(SortParams),
    responses(
        (status = 200, description = "All values of this lookup", body = ApiResponse<Vec<Lookup>>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_lookups<R: LookupRepository>(
    State(service): State<Arc<LookupService<R>>>,
    Query(params): Query<SortParams>,
) -> PortfolioResult<ApiResponse<Vec<Lookup>>> {
    let rows = service.list(params).await?;
    Ok(ApiResponse::new(rows))
}

/// Create a lookup value
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = LookupInput,
    responses(
        (status = 201, description = "Value created", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_lookup<R: LookupRepository>(
    State(service): State<Arc<LookupService<R>>>,
    ValidatedJson(input): ValidatedJson<LookupInput>,
) -> PortfolioResult<Created<MutationResult>> {
    let id = service.create(input).await?;
    Ok(MutationResult::created(
        id,
        format!("{} created successfully", service.kind().resource()),
    ))
}

/// Get a lookup value by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lookup value id")),
    responses(
        (status = 200, description = "Value found", body = ApiResponse<Lookup>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_lookup<R: LookupRepository>(
    State(service): State<Arc<LookupService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<Lookup>> {
    let row = service.get(id).await?;
    Ok(ApiResponse::new(row))
}

/// Rename a lookup value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lookup value id")),
    request_body = LookupInput,
    responses(
        (status = 200, description = "Value updated", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_lookup<R: LookupRepository>(
    State(service): State<Arc<LookupService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<LookupInput>,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.update(id, input).await?;
    Ok(MutationResult::done(format!(
        "{} updated successfully",
        service.kind().resource()
    )))
}

/// Delete a lookup value that nothing references
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Lookup value id")),
    responses(
        (status = 200, description = "Value deleted", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_lookup<R: LookupRepository>(
    State(service): State<Arc<LookupService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.delete(id).await?;
    Ok(MutationResult::done(format!(
        "{} deleted successfully",
        service.kind().resource()
    )))
}
