//! Namecheap query parameter construction

use crate::error::{ProviderError, Result};
use crate::types::{HostRecord, NamecheapCredentials};

use super::NAMECHEAP_PROVIDER;

/// A domain addressed the way the registrar wants it: `SLD` + `TLD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitDomain<'a> {
    pub sld: &'a str,
    pub tld: &'a str,
}

/// Split `domain` on dots and keep the first two labels.
///
/// Multi-label public suffixes are not understood: `a.b.co.uk` becomes
/// `SLD=a, TLD=b`.
pub(crate) fn split_domain(domain: &str) -> Result<SplitDomain<'_>> {
    let mut labels = domain.split('.');
    let sld = labels.next().unwrap_or_default();
    let Some(tld) = labels.next() else {
        return Err(invalid_domain(domain, "must contain at least one dot"));
    };
    if sld.is_empty() || tld.is_empty() {
        return Err(invalid_domain(domain, "empty label"));
    }
    if labels.next().is_some() {
        log::warn!(
            "[{NAMECHEAP_PROVIDER}] Domain '{domain}' has more than two labels, addressing it as SLD={sld} TLD={tld}"
        );
    }
    Ok(SplitDomain { sld, tld })
}

fn invalid_domain(domain: &str, reason: &str) -> ProviderError {
    ProviderError::InvalidParameter {
        provider: NAMECHEAP_PROVIDER.to_string(),
        param: "domain".to_string(),
        detail: format!("'{domain}': {reason}"),
    }
}

/// Global parameters every request carries, followed by `Command`.
pub(crate) fn auth_params(
    credentials: &NamecheapCredentials,
    command: &str,
) -> Vec<(String, String)> {
    vec![
        ("ApiUser".to_string(), credentials.api_user.clone()),
        ("ApiKey".to_string(), credentials.api_key.clone()),
        ("UserName".to_string(), credentials.user_name().to_string()),
        ("ClientIp".to_string(), credentials.client_ip.clone()),
        ("Command".to_string(), command.to_string()),
    ]
}

pub(crate) fn domain_params(domain: &SplitDomain<'_>) -> [(String, String); 2] {
    [
        ("SLD".to_string(), domain.sld.to_string()),
        ("TLD".to_string(), domain.tld.to_string()),
    ]
}

/// Serialize a record set as the 1-indexed `HostNameN/RecordTypeN/AddressN/TTLN` list.
///
/// Indices follow input order and are contiguous.
pub(crate) fn host_record_params(records: &[HostRecord]) -> Vec<(String, String)> {
    records
        .iter()
        .zip(1..)
        .flat_map(|(record, i): (&HostRecord, usize)| {
            [
                (format!("HostName{i}"), record.host_name.clone()),
                (
                    format!("RecordType{i}"),
                    record.record_type.as_str().to_string(),
                ),
                (format!("Address{i}"), record.address.clone()),
                (format!("TTL{i}"), record.effective_ttl().to_string()),
            ]
        })
        .collect()
}
