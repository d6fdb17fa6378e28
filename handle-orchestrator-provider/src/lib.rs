//! # handle-orchestrator-provider
//!
//! Registrar client for publishing the DNS record that proves control of a
//! domain for an AT Protocol handle (`_atproto TXT "did=<did>"`).
//!
//! ## Supported Registrars
//!
//! | Registrar | Auth Method |
//! |-----------|-------------|
//! | [Namecheap](https://www.namecheap.com/support/api/intro/) | API user + key + whitelisted client IP |
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use handle_orchestrator_provider::{NamecheapCredentials, NamecheapProvider, RegistrarClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = NamecheapCredentials::from_env()?;
//!     let provider = NamecheapProvider::new(credentials)?;
//!
//!     // Raw XML, returned uninspected
//!     let hosts = provider.fetch_records("example.com").await?;
//!     println!("{hosts}");
//!
//!     // Replaces EVERY host record on the domain with the single _atproto TXT record
//!     provider
//!         .publish_verification_record("example.com", "plc:abc123")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Replacing Records
//!
//! The registrar only offers "set all records". Whatever is passed to
//! [`RegistrarClient::replace_all_records`] becomes the complete record set:
//!
//! ```rust,no_run
//! # use handle_orchestrator_provider::*;
//! # async fn example(provider: &NamecheapProvider) -> Result<()> {
//! let records = [
//!     HostRecord::new("@", DnsRecordType::A, "192.0.2.1").with_ttl(1800),
//!     HostRecord::new("_atproto", DnsRecordType::Txt, "did=plc:abc123"),
//! ];
//! provider.replace_all_records("example.com", &records).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Responses
//! are never parsed, so a request the registrar rejected still returns `Ok`
//! with the registrar's XML error document. Errors are:
//!
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] — the request did not complete
//! - [`ProviderError::HttpStatus`] — the endpoint answered with a non-2xx status
//! - [`ProviderError::InvalidParameter`] — the domain cannot be split into SLD/TLD
//!
//! Nothing is retried.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait and record helpers
pub use traits::{ATPROTO_HOST, DID_PREFIX, RegistrarClient, verification_record};

// Re-export types
pub use types::{
    CredentialValidationError, DEFAULT_TTL, DnsRecordType, ENV_API_KEY, ENV_API_USER,
    ENV_CLIENT_IP, ENV_USER_NAME, HostRecord, NamecheapCredentials,
};

// Re-export concrete providers
pub use providers::{
    NAMECHEAP_API_URL, NAMECHEAP_SANDBOX_API_URL, NamecheapProvider, NamecheapProviderBuilder,
};
