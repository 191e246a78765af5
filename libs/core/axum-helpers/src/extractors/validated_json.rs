//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Message for a request whose body is empty or `null`.
pub const NO_DATA_PROVIDED: &str = "No data provided";

/// JSON body extractor that runs `Validate` before the handler sees it.
///
/// Every rejection renders the error envelope with status 400:
/// - empty or `null` body: [`NO_DATA_PROVIDED`]
/// - malformed JSON or wrong field types: the serde message
/// - constraint violations: `Invalid fields: ...` with per-field details
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateTenant {
///     #[validate(length(max = 100))]
///     name: Option<String>,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateTenant>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        if is_blank(&bytes) {
            return Err(AppError::BadRequest(NO_DATA_PROVIDED.to_string()).into_response());
        }

        let Json(data) = Json::<T>::from_bytes(&bytes)
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::ValidationError(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    let trimmed = bytes.trim_ascii();
    trimmed.is_empty() || trimmed == b"null"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, max = 5))]
        name: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(p): ValidatedJson<Payload>| async move {
                p.name.unwrap_or_default()
            }),
        )
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let (status, _) = send(r#"{"name":"ok"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_body_reports_no_data() {
        for body in ["", "  ", "null"] {
            let (status, json) = send(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], NO_DATA_PROVIDED);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, json) = send(r#"{"name": 5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"], serde_json::Value::Null);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_constraint_violation_is_bad_request() {
        let (status, json) = send(r#"{"name":"far too long"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid fields: name");
    }
}
