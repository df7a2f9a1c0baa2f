//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every inbound path, the domain and transport schemas they
//! reference, and the session cookie security scheme. The generated document
//! feeds Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain;
use crate::inbound::http::{assistant, auth, listings, profile, reviews};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hearth backend API",
        description = "HTTP interface for browsing, listing and reviewing rental housing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::listings::browse,
        crate::inbound::http::listings::detail,
        crate::inbound::http::listings::create,
        crate::inbound::http::listings::edit_form,
        crate::inbound::http::listings::update,
        crate::inbound::http::listings::change_status,
        crate::inbound::http::listings::remove,
        crate::inbound::http::reviews::board,
        crate::inbound::http::reviews::submit,
        crate::inbound::http::reviews::remove,
        crate::inbound::http::profile::fetch,
        crate::inbound::http::profile::update,
        crate::inbound::http::assistant::greeting,
        crate::inbound::http::assistant::ask,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        domain::Error,
        domain::ErrorCode,
        domain::ListingAccess,
        domain::ListingDraft,
        domain::Notice,
        domain::NoticeLevel,
        domain::Profile,
        domain::Property,
        domain::PropertyStatus,
        domain::Review,
        domain::ReviewBoard,
        domain::Role,
        domain::Transportation,
        auth::SignupRequest,
        auth::LoginRequest,
        auth::SessionResponse,
        listings::BrowseResponse,
        listings::ListingDetailResponse,
        listings::ListingMutationResponse,
        listings::ListingDeletedResponse,
        listings::StatusRequest,
        reviews::SubmitReviewRequest,
        reviews::SubmitReviewResponse,
        reviews::ReviewDeletedResponse,
        profile::ProfileResponse,
        profile::UpdateProfileRequest,
        assistant::AssistantGreeting,
        assistant::AssistantRequest,
        assistant::AssistantReply,
    )),
    tags(
        (name = "auth", description = "Account registration and sessions"),
        (name = "listings", description = "Browse and manage rental listings"),
        (name = "reviews", description = "Property reviews and ratings"),
        (name = "profile", description = "Account profile and landlord portfolio"),
        (name = "assistant", description = "Scripted housing assistant"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_property_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let property_schema = schemas.get("Property").expect("Property schema");

        assert_object_schema_has_field(property_schema, "isFurnished");
        assert_object_schema_has_field(property_schema, "landlordId");
    }

    #[test]
    fn openapi_registers_every_inbound_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/signup",
            "/api/v1/properties",
            "/api/v1/properties/{id}/reviews",
            "/api/v1/profile",
            "/api/v1/assistant",
            "/health/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should register {path}"
            );
        }
    }
}
