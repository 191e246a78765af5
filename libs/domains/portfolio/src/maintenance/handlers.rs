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

use super::models::{CreateMaintenance, Maintenance, MaintenanceFilter, UpdateMaintenance};
use super::repository::MaintenanceRepository;
use super::service::MaintenanceService;
use crate::error::PortfolioResult;

const TAG: &str = "maintenance";

/// OpenAPI documentation for the maintenance API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(
        schemas(Maintenance, CreateMaintenance, UpdateMaintenance, MutationResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Scheduled maintenance on properties")
    )
)]
pub struct ApiDoc;

pub fn router<R: MaintenanceRepository + 'static>(service: MaintenanceService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(shared_service)
}

/// List maintenance tasks
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(MaintenanceFilter),
    responses(
        (status = 200, description = "List of maintenance tasks", body = ApiResponse<Vec<Maintenance>>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_tasks<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    Query(filter): Query<MaintenanceFilter>,
) -> PortfolioResult<ApiResponse<Vec<Maintenance>>> {
    let tasks = service.list_tasks(filter).await?;
    Ok(ApiResponse::new(tasks))
}

/// Schedule a maintenance task
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance created successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_task<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateMaintenance>,
) -> PortfolioResult<Created<MutationResult>> {
    let id = service.create_task(input).await?;
    Ok(MutationResult::created(id, "Maintenance created successfully"))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Maintenance task id")),
    responses(
        (status = 200, description = "Maintenance task found", body = ApiResponse<Maintenance>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_task<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<Maintenance>> {
    let task = service.get_task(id).await?;
    Ok(ApiResponse::new(task))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Maintenance task id")),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Maintenance updated successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_task<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMaintenance>,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.update_task(id, input).await?;
    Ok(MutationResult::done("Maintenance updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Maintenance task id")),
    responses(
        (status = 200, description = "Maintenance deleted successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.delete_task(id).await?;
    Ok(MutationResult::done("Maintenance deleted successfully"))
}
