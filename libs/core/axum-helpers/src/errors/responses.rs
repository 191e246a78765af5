//! Reusable OpenAPI response types for the error envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - missing, malformed, or invalid fields",
    content_type = "application/json",
    example = json!({
        "data": null,
        "error": "Missing required fields: leaseStart, paymentStatusId"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - id is not an integer",
    content_type = "application/json",
    example = json!({
        "data": null,
        "error": "Invalid id: abc"
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "data": null,
        "error": "Lease not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - overlapping lease or rows still referencing the resource",
    content_type = "application/json",
    example = json!({
        "data": null,
        "error": "Cannot delete tenant 3: referenced by 2 lease(s)"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "data": null,
        "error": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
