use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Rental Portfolio API",
        version = "0.1.0",
        description = "Properties, tenants, leases and maintenance, with their lookup tables"
    ),
    servers(
        (url = "/", description = "API base path")
    ),
    nest(
        (path = "/properties", api = domain_portfolio::properties::handlers::ApiDoc),
        (path = "/tenants", api = domain_portfolio::tenants::handlers::ApiDoc),
        (path = "/leases", api = domain_portfolio::leases::handlers::ApiDoc),
        (path = "/maintenance", api = domain_portfolio::maintenance::handlers::ApiDoc),
        (path = "/property_type", api = domain_portfolio::lookups::handlers::ApiDoc),
        (path = "/property_status", api = domain_portfolio::lookups::handlers::ApiDoc),
        (path = "/payment_status", api = domain_portfolio::lookups::handlers::ApiDoc),
        (path = "/maintenance_status", api = domain_portfolio::lookups::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/properties",
            "/tenants/{id}",
            "/leases/tenant/{tenant_id}",
            "/leases/property/{property_id}",
            "/maintenance",
            "/payment_status/{id}",
            "/maintenance_status",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
