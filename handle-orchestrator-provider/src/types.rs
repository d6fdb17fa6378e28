use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

// ============ Host Records ============

/// TTL applied to a [`HostRecord`] that does not carry one, in seconds.
pub const DEFAULT_TTL: u32 = 60;

/// Record types accepted by the registrar's host record API.
///
/// Serialized as the upper-case wire string (`"TXT"`, `"AAAA"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Alias,
    Caa,
    Cname,
    Mx,
    /// Mail forwarding to an external IP.
    Mxe,
    Ns,
    Txt,
    /// Unmasked URL redirect (302).
    Url,
    /// Permanent URL redirect.
    Url301,
    /// Masked URL redirect.
    Frame,
}

impl DnsRecordType {
    /// The string the registrar expects in `RecordTypeN`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Alias => "ALIAS",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Mxe => "MXE",
            Self::Ns => "NS",
            Self::Txt => "TXT",
            Self::Url => "URL",
            Self::Url301 => "URL301",
            Self::Frame => "FRAME",
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One DNS resource record as the registrar manages it.
///
/// A record has no identity beyond its field values. A full record set is an ordered
/// slice of these, and submitting one always replaces every record on the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRecord {
    /// Host label relative to the domain (`@`, `www`, `_atproto`).
    pub host_name: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record value (address, target or text).
    pub address: String,
    /// Time-to-live in seconds. `None` falls back to [`DEFAULT_TTL`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl HostRecord {
    pub fn new(
        host_name: impl Into<String>,
        record_type: DnsRecordType,
        address: impl Into<String>,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            record_type,
            address: address.into(),
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// TTL that goes on the wire. Zero counts as unset.
    pub fn effective_ttl(&self) -> u32 {
        self.ttl.filter(|ttl| *ttl > 0).unwrap_or(DEFAULT_TTL)
    }
}

// ============ Credentials ============

/// Credential validation error.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Environment variable holding the API user.
pub const ENV_API_USER: &str = "NAMECHEAP_API_USER";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "NAMECHEAP_API_KEY";
/// Environment variable holding the whitelisted client IP.
pub const ENV_CLIENT_IP: &str = "NAMECHEAP_CLIENT_IP";
/// Environment variable overriding the account user name.
pub const ENV_USER_NAME: &str = "NAMECHEAP_USERNAME";

/// API identity for the Namecheap registrar.
///
/// Opaque strings, fixed for the lifetime of the provider built from them.
/// `Debug` masks the API key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamecheapCredentials {
    /// `ApiUser` parameter.
    pub api_user: String,
    /// `ApiKey` parameter.
    pub api_key: String,
    /// `ClientIp` parameter. Must be whitelisted in the registrar account.
    pub client_ip: String,
    /// `UserName` parameter. Defaults to `api_user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl fmt::Debug for NamecheapCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamecheapCredentials")
            .field("api_user", &self.api_user)
            .field("api_key", &mask_secret(&self.api_key))
            .field("client_ip", &self.client_ip)
            .field("user_name", &self.user_name)
            .finish()
    }
}

impl NamecheapCredentials {
    pub fn new(
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        client_ip: impl Into<String>,
    ) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
            client_ip: client_ip.into(),
            user_name: None,
        }
    }

    #[must_use]
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// Value sent as `UserName`.
    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.api_user)
    }

    /// Reject credentials with empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError::EmptyField`] for the first blank field.
    pub fn validate(&self) -> Result<(), CredentialValidationError> {
        let fields = [
            ("apiUser", "API User", self.api_user.as_str()),
            ("apiKey", "API Key", self.api_key.as_str()),
            ("clientIp", "Client IP", self.client_ip.as_str()),
        ];
        for (field, label, value) in fields {
            if value.trim().is_empty() {
                return Err(CredentialValidationError::EmptyField {
                    field: field.to_string(),
                    label: label.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Construct credentials from a flat key-value map.
    ///
    /// Keys are `apiUser`, `apiKey`, `clientIp` and the optional `userName`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let user_name = map
            .get("userName")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self {
            api_user: Self::get_required_field(map, "apiUser", "API User")?,
            api_key: Self::get_required_field(map, "apiKey", "API Key")?,
            client_ip: Self::get_required_field(map, "clientIp", "Client IP")?,
            user_name,
        })
    }

    /// Read credentials from the `NAMECHEAP_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] naming the missing or empty variable.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        let map: HashMap<String, String> = [
            ("apiUser", ENV_API_USER),
            ("apiKey", ENV_API_KEY),
            ("clientIp", ENV_CLIENT_IP),
            ("userName", ENV_USER_NAME),
        ]
        .into_iter()
        .filter_map(|(key, var)| std::env::var(var).ok().map(|v| (key.to_string(), v)))
        .collect();

        Self::from_map(&map)
    }

    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, String> {
        [
            ("apiUser".to_string(), "alice".to_string()),
            ("apiKey".to_string(), "k3y".to_string()),
            ("clientIp".to_string(), "203.0.113.7".to_string()),
        ]
        .into()
    }

    #[test]
    fn record_type_wire_strings() {
        assert_eq!(DnsRecordType::Txt.as_str(), "TXT");
        assert_eq!(DnsRecordType::Aaaa.as_str(), "AAAA");
        assert_eq!(DnsRecordType::Url301.to_string(), "URL301");
    }

    #[test]
    fn record_type_serde_matches_wire() {
        let json = serde_json::to_string(&DnsRecordType::Cname).unwrap();
        assert_eq!(json, "\"CNAME\"");
        let back: DnsRecordType = serde_json::from_str("\"MXE\"").unwrap();
        assert_eq!(back, DnsRecordType::Mxe);
    }

    #[test]
    fn ttl_defaults_to_sixty() {
        let record = HostRecord::new("@", DnsRecordType::A, "192.0.2.1");
        assert_eq!(record.effective_ttl(), 60);
    }

    #[test]
    fn explicit_ttl_is_kept() {
        let record = HostRecord::new("@", DnsRecordType::A, "192.0.2.1").with_ttl(120);
        assert_eq!(record.effective_ttl(), 120);
    }

    #[test]
    fn zero_ttl_counts_as_unset() {
        let record = HostRecord::new("@", DnsRecordType::A, "192.0.2.1").with_ttl(0);
        assert_eq!(record.effective_ttl(), DEFAULT_TTL);
    }

    #[test]
    fn user_name_defaults_to_api_user() {
        let creds = NamecheapCredentials::new("alice", "k3y", "203.0.113.7");
        assert_eq!(creds.user_name(), "alice");
        let creds = creds.with_user_name("bob");
        assert_eq!(creds.user_name(), "bob");
    }

    #[test]
    fn debug_masks_api_key() {
        let creds = NamecheapCredentials::new("alice", "supersecretkey", "203.0.113.7");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("supersecretkey"), "key leaked: {debug}");
        assert!(debug.contains("alice"));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let creds = NamecheapCredentials::new("alice", "   ", "203.0.113.7");
        assert_eq!(
            creds.validate(),
            Err(CredentialValidationError::EmptyField {
                field: "apiKey".to_string(),
                label: "API Key".to_string(),
            })
        );
        assert!(
            NamecheapCredentials::new("alice", "k3y", "203.0.113.7")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn from_map_full() {
        let res = NamecheapCredentials::from_map(&full_map());
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(creds) = res else {
            return;
        };
        assert_eq!(creds.api_user, "alice");
        assert_eq!(creds.api_key, "k3y");
        assert_eq!(creds.client_ip, "203.0.113.7");
        assert_eq!(creds.user_name(), "alice");
    }

    #[test]
    fn from_map_with_user_name() {
        let mut map = full_map();
        map.insert("userName".to_string(), "bob".to_string());
        let creds = NamecheapCredentials::from_map(&map).unwrap();
        assert_eq!(creds.user_name(), "bob");
    }

    #[test]
    fn from_map_missing_field() {
        let mut map = full_map();
        map.remove("clientIp");
        let err = NamecheapCredentials::from_map(&map).unwrap_err();
        assert!(
            matches!(err, CredentialValidationError::MissingField { ref field, .. } if field == "clientIp"),
            "expected MissingField(clientIp), got {err:?}"
        );
        assert_eq!(err.to_string(), "Missing required field: Client IP");
    }

    #[test]
    fn from_map_empty_field() {
        let mut map = full_map();
        map.insert("apiUser".to_string(), "  ".to_string());
        let err = NamecheapCredentials::from_map(&map).unwrap_err();
        assert!(
            matches!(err, CredentialValidationError::EmptyField { ref field, .. } if field == "apiUser"),
            "expected EmptyField(apiUser), got {err:?}"
        );
    }

    #[test]
    fn from_map_blank_user_name_falls_back() {
        let mut map = full_map();
        map.insert("userName".to_string(), String::new());
        let creds = NamecheapCredentials::from_map(&map).unwrap();
        assert_eq!(creds.user_name, None);
        assert_eq!(creds.user_name(), "alice");
    }
}
