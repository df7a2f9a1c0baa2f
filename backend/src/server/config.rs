//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use url::Url;

/// Connection settings for the hosted data and auth APIs.
#[derive(Debug, Clone)]
pub struct RestBackendConfig {
    /// Base URL of the data API; table paths are joined onto it.
    pub data_url: Url,
    /// Base URL of the auth API.
    pub auth_url: Url,
    /// Service key sent with every outbound request.
    pub service_key: String,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rest_backend: Option<RestBackendConfig>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            rest_backend: None,
        }
    }

    /// Attach hosted-API settings for the outbound adapters.
    ///
    /// Without this, the server falls back to in-memory persistence and
    /// identity, which lose all state on restart.
    #[must_use]
    pub fn with_rest_backend(mut self, backend: RestBackendConfig) -> Self {
        self.rest_backend = Some(backend);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
