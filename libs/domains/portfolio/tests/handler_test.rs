//! Handler tests for the Portfolio domain
//!
//! These tests drive the resource routers over in-memory repositories:
//! - Request deserialization, including the lowercase field aliases
//! - Envelope shape and HTTP status codes
//! - Lease overlap and delete guards as seen over HTTP
//!
//! Every router shares one `InMemoryStore`, mounted the way the API binary
//! mounts them.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_portfolio::lookups::{self, InMemoryLookupRepository};
use domain_portfolio::{
    InMemoryStore, LookupKind, LookupService,
    leases::{self, InMemoryLeaseRepository, LeaseService},
    maintenance::{self, InMemoryMaintenanceRepository, MaintenanceService},
    properties::{self, InMemoryPropertyRepository, PropertyService},
    tenants::{self, InMemoryTenantRepository, TenantService},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let store = InMemoryStore::new();

    let mut router = Router::new()
        .nest(
            "/properties",
            properties::handlers::router(PropertyService::new(InMemoryPropertyRepository::new(
                store.clone(),
            ))),
        )
        .nest(
            "/tenants",
            tenants::handlers::router(TenantService::new(InMemoryTenantRepository::new(
                store.clone(),
            ))),
        )
        .nest(
            "/leases",
            leases::handlers::router(LeaseService::new(InMemoryLeaseRepository::new(
                store.clone(),
            ))),
        )
        .nest(
            "/maintenance",
            maintenance::handlers::router(MaintenanceService::new(
                InMemoryMaintenanceRepository::new(store.clone()),
            )),
        );

    for kind in LookupKind::ALL {
        let service = LookupService::new(kind, InMemoryLookupRepository::new(store.clone()));
        router = router.nest(kind.path(), lookups::handlers::router(service));
    }
    router
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, json) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, json);
    json["data"]["id"].as_i64().unwrap()
}

async fn property(app: &Router, address: &str) -> i64 {
    create(
        app,
        "/properties",
        json!({
            "address": address,
            "typeId": 1,
            "statusId": 1,
            "purchaseDate": "2020-05-01",
            "price": 250000.0
        }),
    )
    .await
}

async fn tenant(app: &Router, name: &str) -> i64 {
    create(
        app,
        "/tenants",
        json!({"name": name, "contactInfo": "555-0100"}),
    )
    .await
}

async fn lease(app: &Router, tenant_id: i64, property_id: i64, start: &str, end: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/leases",
        Some(json!({
            "tenantId": tenant_id,
            "propertyId": property_id,
            "leaseStart": start,
            "leaseEnd": end,
            "paymentStatusId": 1
        })),
    )
    .await
}

// ============================================================================
// Envelope and validation
// ============================================================================

#[tokio::test]
async fn test_create_property_returns_201_envelope() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/properties",
        Some(json!({
            "address": "12 Oak Street",
            "typeId": 1,
            "statusId": 2,
            "purchaseDate": "2020-05-01",
            "price": 250000.5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json,
        json!({"data": {"id": 1, "message": "Property created successfully"}})
    );

    let (status, json) = send(&app, "GET", "/properties/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["type"], "Residential");
    assert_eq!(json["data"]["status"], "Occupied");
    assert_eq!(json["data"]["price"], 250000.5);
}

#[tokio::test]
async fn test_missing_fields_are_listed() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/leases",
        Some(json!({"tenantId": 1, "propertyId": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"], Value::Null);
    assert_eq!(
        json["error"],
        "Missing required fields: leaseStart, leaseEnd, paymentStatusId"
    );
}

#[tokio::test]
async fn test_empty_body_reports_no_data() {
    let app = app();

    for body in [None, Some(json!({}))] {
        let (status, json) = send(&app, "POST", "/tenants", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No data provided");
    }
}

#[tokio::test]
async fn test_invalid_id_is_400() {
    let app = app();

    let (status, json) = send(&app, "GET", "/tenants/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid id: abc");
}

#[tokio::test]
async fn test_missing_rows_are_404() {
    let app = app();

    for (uri, message) in [
        ("/properties/99", "Property not found"),
        ("/tenants/99", "Tenant not found"),
        ("/leases/99", "Lease not found"),
        ("/maintenance/99", "Maintenance not found"),
        ("/payment_status/99", "PaymentStatus not found"),
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(json, json!({"data": null, "error": message}));
    }

    let (status, _) = send(&app, "DELETE", "/leases/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_date_and_unknown_sort_are_400() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/tenants",
        Some(json!({"name": "Jane", "contactinfo": "jane@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);

    let property_id = property(&app, "1 Main").await;
    let (status, json) = lease(&app, 1, property_id, "01/01/2024", "2024-12-31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("leaseStart"));

    let (status, json) = send(&app, "GET", "/properties?sort=rent", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid sort field: rent");

    let (status, _) = send(&app, "GET", "/properties?order=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Lease overlap guard
// ============================================================================

#[tokio::test]
async fn test_lease_sharing_boundary_day_is_409() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    let property_id = property(&app, "1 Main").await;

    let (status, _) = lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = lease(&app, tenant_id, property_id, "2024-12-31", "2025-06-30").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        "Cannot create lease: property has overlapping lease for the specified dates"
    );

    let (status, json) = send(&app, "GET", "/leases", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_adjacent_lease_is_accepted() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    let property_id = property(&app, "1 Main").await;

    lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;
    let (status, json) = lease(&app, tenant_id, property_id, "2025-01-01", "2025-12-31").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["message"], "Lease created successfully");
}

#[tokio::test]
async fn test_lease_update_into_neighbour_is_409() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    let property_id = property(&app, "1 Main").await;

    lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;
    lease(&app, tenant_id, property_id, "2025-01-01", "2025-12-31").await;

    let (status, json) = send(
        &app,
        "PUT",
        "/leases/1",
        Some(json!({"leaseEnd": "2025-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        "Cannot update lease: property has overlapping lease for the specified dates"
    );

    // Changing only the payment status keeps the stored term and passes the guard
    let (status, json) = send(
        &app,
        "PUT",
        "/leases/1",
        Some(json!({"paymentStatusId": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Lease updated successfully");

    let (_, json) = send(&app, "GET", "/leases/1", None).await;
    assert_eq!(json["data"]["paymentStatus"], "Overdue");
    assert_eq!(json["data"]["leaseEnd"], "2024-12-31");
}

#[tokio::test]
async fn test_tenant_and_property_lease_listings() {
    let app = app();
    let jane = tenant(&app, "Jane").await;
    let john = tenant(&app, "John").await;
    let first = property(&app, "1 Main").await;
    let second = property(&app, "2 Main").await;

    lease(&app, jane, first, "2024-01-01", "2024-12-31").await;
    lease(&app, john, second, "2024-01-01", "2024-12-31").await;
    lease(&app, jane, second, "2025-01-01", "2025-12-31").await;

    let (status, json) = send(&app, "GET", &format!("/leases/tenant/{}", jane), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (_, json) = send(
        &app,
        "GET",
        &format!("/leases/property/{}?sort=leaseStart&order=desc", second),
        None,
    )
    .await;
    let starts: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["leaseStart"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(starts, vec!["2025-01-01", "2024-01-01"]);

    let (_, json) = send(&app, "GET", "/leases/tenant/999", None).await;
    assert_eq!(json["data"], json!([]));
}

// ============================================================================
// Delete guards
// ============================================================================

#[tokio::test]
async fn test_delete_referenced_property_is_409() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    let property_id = property(&app, "1 Main").await;

    lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;
    create(
        &app,
        "/maintenance",
        json!({
            "description": "Fix roof",
            "statusId": 1,
            "scheduledDate": "2024-09-15",
            "propertyId": property_id
        }),
    )
    .await;

    let (status, json) = send(&app, "DELETE", &format!("/properties/{}", property_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        format!(
            "Cannot delete property {}: referenced by 1 lease(s) and 1 maintenance task(s)",
            property_id
        )
    );

    let (status, _) = send(&app, "GET", &format!("/properties/{}", property_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_tenant_after_lease_removed() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    let property_id = property(&app, "1 Main").await;
    lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;

    let uri = format!("/tenants/{}", tenant_id);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "DELETE", "/leases/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"data": {"message": "Tenant deleted successfully"}})
    );
}

// ============================================================================
// Partial updates, listing, lookups
// ============================================================================

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = app();
    let property_id = property(&app, "1 Main").await;
    let uri = format!("/properties/{}", property_id);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"propertystatusid": 2}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(json["data"]["status"], "Occupied");
    assert_eq!(json["data"]["address"], "1 Main");
    assert_eq!(json["data"]["purchaseDate"], "2020-05-01");

    let (status, json) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No data provided");
}

#[tokio::test]
async fn test_get_returns_fields_exactly_as_submitted() {
    let app = app();
    let id = create(
        &app,
        "/tenants",
        json!({"name": "  Jane Doe ", "contactInfo": "jane@example.com "}),
    )
    .await;

    let (status, json) = send(&app, "GET", &format!("/tenants/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "  Jane Doe ");
    assert_eq!(json["data"]["contactInfo"], "jane@example.com ");

    let (status, _) = send(&app, "POST", "/tenants", Some(json!({"name": "   ", "contactInfo": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_status_and_sorts() {
    let app = app();
    let property_id = property(&app, "1 Main").await;

    for (description, status_id, date) in [
        ("Paint", 1, "2024-09-20"),
        ("Roof", 3, "2024-09-10"),
        ("Boiler", 1, "2024-09-05"),
    ] {
        create(
            &app,
            "/maintenance",
            json!({
                "description": description,
                "maintenancestatusid": status_id,
                "scheduleddate": date,
                "propertyid": property_id
            }),
        )
        .await;
    }

    let (status, json) = send(
        &app,
        "GET",
        "/maintenance?status=SCHEDULED&sort=description&order=desc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["description"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Paint", "Boiler"]);
}

#[tokio::test]
async fn test_tenant_list_includes_lease_count() {
    let app = app();
    let tenant_id = tenant(&app, "Jane").await;
    tenant(&app, "John").await;
    let property_id = property(&app, "1 Main").await;
    lease(&app, tenant_id, property_id, "2024-01-01", "2024-12-31").await;

    let (_, json) = send(&app, "GET", "/tenants?sort=name", None).await;
    assert_eq!(json["data"][0]["name"], "Jane");
    assert_eq!(json["data"][0]["leaseCount"], 1);
    assert_eq!(json["data"][1]["leaseCount"], 0);
}

#[tokio::test]
async fn test_lookup_crud_and_conflicts() {
    let app = app();

    let (status, json) = send(&app, "GET", "/payment_status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let id = create(&app, "/property_status", json!({"description": "Under Renovation"})).await;

    let (status, json) = send(
        &app,
        "POST",
        "/property_status",
        Some(json!({"description": "Under Renovation"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "PropertyStatus 'Under Renovation' already exists");

    let (status, json) = send(&app, "DELETE", &format!("/property_status/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "PropertyStatus deleted successfully");

    property(&app, "1 Main").await;
    let (status, _) = send(&app, "DELETE", "/property_type/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reference_to_missing_row_is_409() {
    let app = app();

    let (status, json) = send(
        &app,
        "POST",
        "/properties",
        Some(json!({
            "address": "1 Main",
            "typeId": 42,
            "statusId": 1,
            "purchaseDate": "2020-05-01",
            "price": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Referenced property type 42 does not exist");
}
