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

use super::models::{CreateProperty, Property, PropertyFilter, UpdateProperty};
use super::repository::PropertyRepository;
use super::service::PropertyService;
use crate::error::PortfolioResult;

const TAG: &str = "properties";

/// OpenAPI documentation for the properties API
#[derive(OpenApi)]
#[openapi(
    paths(list_properties, create_property, get_property, update_property, delete_property),
    components(
        schemas(Property, CreateProperty, UpdateProperty, MutationResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Rental properties")
    )
)]
pub struct ApiDoc;

/// Create the property router with all HTTP endpoints
pub fn router<R: PropertyRepository + 'static>(service: PropertyService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
        .with_state(shared_service)
}

/// List properties with optional filters and sorting
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PropertyFilter),
    responses(
        (status = 200, description = "List of properties", body = ApiResponse<Vec<Property>>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_properties<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    Query(filter): Query<PropertyFilter>,
) -> PortfolioResult<ApiResponse<Vec<Property>>> {
    let properties = service.list_properties(filter).await?;
    Ok(ApiResponse::new(properties))
}

/// Create a new property
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Property created successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProperty>,
) -> PortfolioResult<Created<MutationResult>> {
    let id = service.create_property(input).await?;
    Ok(MutationResult::created(id, "Property created successfully"))
}

/// Get a property by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property found", body = ApiResponse<Property>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<Property>> {
    let property = service.get_property(id).await?;
    Ok(ApiResponse::new(property))
}

/// Update a property; absent fields keep their value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Property id")),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Property updated successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProperty>,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.update_property(id, input).await?;
    Ok(MutationResult::done("Property updated successfully"))
}

/// Delete a property with no leases or maintenance tasks
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted successfully", body = ApiResponse<MutationResult>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    IdPath(id): IdPath,
) -> PortfolioResult<ApiResponse<MutationResult>> {
    service.delete_property(id).await?;
    Ok(MutationResult::done("Property deleted successfully"))
}
