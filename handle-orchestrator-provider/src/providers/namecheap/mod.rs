//! Namecheap Provider

mod http;
mod params;
mod provider;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};
use crate::types::NamecheapCredentials;

/// Production XML API endpoint.
pub const NAMECHEAP_API_URL: &str = "https://api.namecheap.com/xml.response";
/// Sandbox XML API endpoint.
pub const NAMECHEAP_SANDBOX_API_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

pub(crate) const NAMECHEAP_PROVIDER: &str = "namecheap";
pub(crate) const CMD_GET_HOSTS: &str = "namecheap.domains.dns.getHosts";
pub(crate) const CMD_SET_HOSTS: &str = "namecheap.domains.dns.setHosts";

/// Namecheap Provider
pub struct NamecheapProvider {
    pub(crate) client: Client,
    pub(crate) credentials: NamecheapCredentials,
    pub(crate) base_url: String,
}

/// Namecheap Provider Builder
pub struct NamecheapProviderBuilder {
    credentials: NamecheapCredentials,
    base_url: Option<String>,
    sandbox: bool,
    connect_timeout: Duration,
    timeout: Duration,
}

impl NamecheapProviderBuilder {
    fn new(credentials: NamecheapCredentials) -> Self {
        Self {
            credentials,
            base_url: None,
            sandbox: false,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Talk to the sandbox endpoint instead of production.
    #[must_use]
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Override the endpoint URL. Takes precedence over [`sandbox`](Self::sandbox).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Whole-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<NamecheapProvider> {
        let base_url = self.base_url.unwrap_or_else(|| {
            if self.sandbox {
                NAMECHEAP_SANDBOX_API_URL.to_string()
            } else {
                NAMECHEAP_API_URL.to_string()
            }
        });

        Ok(NamecheapProvider {
            client: create_http_client(self.connect_timeout, self.timeout, NAMECHEAP_PROVIDER)?,
            credentials: self.credentials,
            base_url,
        })
    }
}

impl NamecheapProvider {
    pub fn new(credentials: NamecheapCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: NamecheapCredentials) -> NamecheapProviderBuilder {
        NamecheapProviderBuilder::new(credentials)
    }

    /// Endpoint this provider sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
