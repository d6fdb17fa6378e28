//! Public types used by verification operations.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Label the handle verification record lives under.
pub const ATPROTO_LABEL: &str = "_atproto";

/// Prefix of the verification record value.
pub const DID_PREFIX: &str = "did=";

/// Attempts made when the caller does not choose.
pub const DEFAULT_RETRIES: u32 = 10;

/// Pause between attempts when the caller does not choose.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(30);

/// Upper bound on a single TXT query, in seconds.
pub const QUERY_TIMEOUT_SECS: u64 = 5;

/// What to look for, where, and how long to keep looking.
///
/// Lives for the duration of one verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTarget {
    /// Domain the handle is claimed for (without the `_atproto` label).
    pub domain: String,
    /// Substring that must appear in the concatenated TXT data.
    pub expected: String,
    /// Maximum number of resolution attempts.
    pub retries: u32,
    /// Pause between two attempts. Not applied after the last one.
    pub delay: Duration,
    /// Query this nameserver instead of the system resolver.
    pub nameserver: Option<IpAddr>,
    /// Upper bound on each individual query.
    pub query_timeout: Duration,
}

impl VerificationTarget {
    /// Target for `did=<did>` on `_atproto.<domain>` with the default budget.
    pub fn new(domain: impl Into<String>, did: &str) -> Self {
        Self {
            domain: domain.into(),
            expected: format!("{DID_PREFIX}{did}"),
            retries: DEFAULT_RETRIES,
            delay: DEFAULT_DELAY,
            nameserver: None,
            query_timeout: Duration::from_secs(QUERY_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_nameserver(mut self, nameserver: Option<IpAddr>) -> Self {
        self.nameserver = nameserver;
        self
    }

    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Fully qualified name that gets queried.
    pub fn record_name(&self) -> String {
        format!("{ATPROTO_LABEL}.{}", self.domain)
    }
}

/// How a verification run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum VerificationOutcome {
    /// The expected value was observed on attempt `attempts`.
    Verified { attempts: u32 },
    /// Every attempt ran without a match.
    Exhausted { attempts: u32 },
    /// The caller cancelled after `attempts` completed attempts.
    Cancelled { attempts: u32 },
}

impl VerificationOutcome {
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Attempts that completed before the run ended.
    pub fn attempts(self) -> u32 {
        match self {
            Self::Verified { attempts }
            | Self::Exhausted { attempts }
            | Self::Cancelled { attempts } => attempts,
        }
    }
}
