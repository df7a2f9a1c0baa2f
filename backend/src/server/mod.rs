//! Server construction and middleware wiring.

mod config;

pub use config::{RestBackendConfig, ServerConfig};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{PropertyRepository, ReviewRepository};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{assistant, auth, listings, profile, reviews};
use crate::middleware::RequestLog;
use crate::outbound::identity::RestIdentity;
use crate::outbound::persistence::{InMemoryCredentials, InMemoryPersistence, RestPersistence};

/// Build the HTTP state from configuration.
///
/// Uses the hosted data and auth APIs when configured, otherwise falls back
/// to in-memory adapters for local development and tests.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.rest_backend {
        Some(backend) => {
            let persistence = Arc::new(
                RestPersistence::new(backend.data_url.clone(), backend.service_key.clone())
                    .map_err(|error| {
                        std::io::Error::other(format!("data API client construction failed: {error}"))
                    })?,
            );
            let identity = Arc::new(
                RestIdentity::new(backend.auth_url.clone(), backend.service_key.clone()).map_err(
                    |error| {
                        std::io::Error::other(format!("auth API client construction failed: {error}"))
                    },
                )?,
            );
            let properties: Arc<dyn PropertyRepository> = persistence.clone();
            let reviews: Arc<dyn ReviewRepository> = persistence.clone();
            Ok(HttpState::new(identity, properties, reviews, persistence))
        }
        None => {
            warn!("no hosted backend configured; using in-memory persistence (state is volatile)");
            let persistence = Arc::new(InMemoryPersistence::new());
            let properties: Arc<dyn PropertyRepository> = persistence.clone();
            let reviews: Arc<dyn ReviewRepository> = persistence.clone();
            Ok(HttpState::new(
                Arc::new(InMemoryCredentials::new()),
                properties,
                reviews,
                persistence,
            ))
        }
    }
}

/// Shared dependencies handed to each worker's app factory.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Service bundle behind the handlers.
    pub http_state: web::Data<HttpState>,
    /// Session cookie signing key.
    pub key: Key,
    /// Whether the session cookie requires HTTPS.
    pub cookie_secure: bool,
    /// SameSite policy for the session cookie.
    pub same_site: SameSite,
}

/// Assemble the application: session middleware, request logging, every REST
/// route under `/api/v1`, health probes, and (debug builds) Swagger UI.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(listings::browse)
        .service(listings::create)
        .service(listings::edit_form)
        .service(listings::change_status)
        .service(reviews::board)
        .service(reviews::submit)
        .service(reviews::remove)
        .service(listings::detail)
        .service(listings::update)
        .service(listings::remove)
        .service(profile::fetch)
        .service(profile::update)
        .service(assistant::greeting)
        .service(assistant::ask);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestLog)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction or binding the
/// socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        rest_backend: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
