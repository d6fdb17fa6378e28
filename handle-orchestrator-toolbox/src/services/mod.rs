//! Stateless service façade exposing the verification operations.
//!
//! Every method on [`ToolboxService`] is an associated function; no instance is needed.

mod resolver;
mod verify;

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::ToolboxResult;
use crate::types::{VerificationOutcome, VerificationTarget};

pub use resolver::TxtResolver;
pub use verify::{verify_record, verify_record_with_cancel};

/// Entry point for handle verification polling.
///
/// Lookups without a nameserver go through a shared resolver built from the
/// system configuration; a nameserver gets a dedicated resolver per call.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use handle_orchestrator_toolbox::ToolboxService;
/// # async fn demo() {
/// let ok = ToolboxService::verify_record("example.com", "plc:abc123", 10, Duration::from_secs(30)).await;
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Poll `_atproto.<domain>` for `did=<did>`.
    ///
    /// Returns `true` as soon as the value is seen, `false` once `retries`
    /// attempts came up empty. Lookup failures are never surfaced.
    pub async fn verify_record(domain: &str, did: &str, retries: u32, delay: Duration) -> bool {
        let target = VerificationTarget::new(domain, did)
            .with_retries(retries)
            .with_delay(delay);
        Self::verify(&target).await
    }

    /// Poll with a fully specified target.
    pub async fn verify(target: &VerificationTarget) -> bool {
        Self::verify_with_cancel(target, std::future::pending::<()>())
            .await
            .is_verified()
    }

    /// Poll with a fully specified target until `cancel` completes.
    pub async fn verify_with_cancel<C: Future>(
        target: &VerificationTarget,
        cancel: C,
    ) -> VerificationOutcome {
        if let Some(ns) = target.nameserver {
            let resolver = resolver::build_resolver_for_ns(Some(ns));
            verify::verify_record_with_cancel(&resolver, target, cancel).await
        } else {
            verify::verify_record_with_cancel(&*resolver::DEFAULT_RESOLVER, target, cancel).await
        }
    }

    /// Parse a nameserver IP address given on the command line or in config.
    pub fn parse_nameserver(nameserver: &str) -> ToolboxResult<IpAddr> {
        resolver::parse_nameserver(nameserver)
    }

    /// Human-readable list of the nameservers the shared resolver uses.
    pub fn system_nameservers() -> &'static str {
        resolver::SYSTEM_DNS_LABEL.as_str()
    }
}
