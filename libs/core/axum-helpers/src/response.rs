//! Success envelope: every payload is wrapped under `data`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"data": <payload>}` with status 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{"data": <payload>}` with status 201.
#[derive(Debug)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(ApiResponse::new(self.0))).into_response()
    }
}

/// Acknowledgement for create, update and delete.
///
/// `id` is present on create only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MutationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub message: String,
}

impl MutationResult {
    pub fn created(id: i32, message: impl Into<String>) -> Created<Self> {
        Created(Self {
            id: Some(id),
            message: message.into(),
        })
    }

    pub fn done(message: impl Into<String>) -> ApiResponse<Self> {
        ApiResponse::new(Self {
            id: None,
            message: message.into(),
        })
    }
}
