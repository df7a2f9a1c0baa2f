//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use hearth::inbound::http::health::HealthState;
use hearth::server::{RestBackendConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = match env::var("BIND_ADDR") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {raw}: {e}")))?,
        Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
    };

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    if let Some(backend) = rest_backend_from_env()? {
        config = config.with_rest_backend(backend);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Read hosted-API settings from the environment.
///
/// All three variables must be present together; a partial set is a
/// configuration mistake and refuses to start rather than silently running
/// on volatile storage.
fn rest_backend_from_env() -> std::io::Result<Option<RestBackendConfig>> {
    let data_url = env::var("DATA_API_URL").ok();
    let auth_url = env::var("AUTH_API_URL").ok();
    let service_key = env::var("SERVICE_API_KEY").ok();

    match (data_url, auth_url, service_key) {
        (Some(data_url), Some(auth_url), Some(service_key)) => {
            let data_url = Url::parse(&data_url)
                .map_err(|e| std::io::Error::other(format!("invalid DATA_API_URL: {e}")))?;
            let auth_url = Url::parse(&auth_url)
                .map_err(|e| std::io::Error::other(format!("invalid AUTH_API_URL: {e}")))?;
            Ok(Some(RestBackendConfig {
                data_url,
                auth_url,
                service_key,
            }))
        }
        (None, None, None) => Ok(None),
        _ => Err(std::io::Error::other(
            "DATA_API_URL, AUTH_API_URL and SERVICE_API_KEY must be set together",
        )),
    }
}
