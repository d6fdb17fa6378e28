//! DNS resolver construction and the TXT lookup seam used by verification.

use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    TokioResolver,
};

use crate::error::{ToolboxError, ToolboxResult};

/// Source of TXT data for a fully qualified name.
///
/// Each inner `Vec` is one TXT record, split into the character-strings it was
/// published as.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    async fn resolve_txt(&self, name: &str) -> ToolboxResult<Vec<Vec<String>>>;
}

#[async_trait]
impl TxtResolver for TokioResolver {
    async fn resolve_txt(&self, name: &str) -> ToolboxResult<Vec<Vec<String>>> {
        let response = self
            .txt_lookup(name)
            .await
            .map_err(|e| ToolboxError::NetworkError(e.to_string()))?;

        Ok(response
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                    .collect()
            })
            .collect())
    }
}

/// Shared default DNS resolver.
///
/// On Unix/Windows this uses the host system configuration (e.g. `/etc/resolv.conf`).
/// If the system configuration cannot be loaded, it falls back to Hickory's default
/// upstream set (Google Public DNS).
pub(crate) static DEFAULT_RESOLVER: LazyLock<TokioResolver> = LazyLock::new(build_system_resolver);

/// Human-readable description of the DNS servers used by the default resolver.
pub(crate) static SYSTEM_DNS_LABEL: LazyLock<String> = LazyLock::new(|| {
    #[cfg(any(unix, target_os = "windows"))]
    {
        if let Ok((config, _opts)) = hickory_resolver::system_conf::read_system_conf() {
            let ips = dedup_ips(&config);
            if !ips.is_empty() {
                return ips.join(", ");
            }
        }
    }

    let fallback = ResolverConfig::default();
    let ips = dedup_ips(&fallback);
    if ips.is_empty() {
        "Default".to_string()
    } else {
        ips.join(", ")
    }
});

/// Deduplicate nameserver IP addresses from a resolver configuration.
pub(crate) fn dedup_ips(config: &ResolverConfig) -> Vec<String> {
    let mut ips: Vec<String> = Vec::new();
    for ns in config.name_servers() {
        let ip = ns.socket_addr.ip().to_string();
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    }
    ips
}

/// Options for a resolver that is polled for a record that is still propagating.
///
/// Hickory caches answers, negative ones included, for up to the record's TTL. A
/// cached NXDOMAIN would hide the record for the rest of the retry budget, so
/// nothing is kept.
fn polling_opts(mut opts: ResolverOpts) -> ResolverOpts {
    opts.positive_max_ttl = Some(Duration::ZERO);
    opts.negative_max_ttl = Some(Duration::ZERO);
    opts
}

/// Build a resolver that targets a specific nameserver IP, or falls back to the
/// system configuration when `ns_ip` is `None`.
pub(crate) fn build_resolver_for_ns(ns_ip: Option<IpAddr>) -> TokioResolver {
    if let Some(ns_ip) = ns_ip {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ns_ip], 53, true),
        );
        let provider = TokioConnectionProvider::default();
        return TokioResolver::builder_with_config(config, provider)
            .with_options(polling_opts(ResolverOpts::default()))
            .build();
    }

    build_system_resolver()
}

/// Build a resolver using the host system DNS configuration (with fallback).
fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(mut builder) => {
                let opts = polling_opts(builder.options_mut().clone());
                *builder.options_mut() = opts;
                return builder.build();
            }
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    let provider = TokioConnectionProvider::default();
    TokioResolver::builder_with_config(ResolverConfig::default(), provider)
        .with_options(polling_opts(ResolverOpts::default()))
        .build()
}

/// Parse a nameserver given as text.
pub(crate) fn parse_nameserver(ns: &str) -> ToolboxResult<IpAddr> {
    let ns = ns.trim();
    ns.parse()
        .map_err(|_| ToolboxError::ValidationError(format!("无效的 DNS 服务器地址: {ns}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ips_default_config() {
        let config = ResolverConfig::default();
        let ips = dedup_ips(&config);
        assert!(
            !ips.is_empty(),
            "Default config should have at least one nameserver IP"
        );
    }

    #[test]
    fn test_dedup_ips_empty_config() {
        let config = ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::new());
        let ips = dedup_ips(&config);
        assert!(ips.is_empty(), "Empty config should produce no IPs");
    }

    #[test]
    fn test_dedup_ips_removes_duplicates() {
        let ip: IpAddr = "1.2.3.4".parse().unwrap();
        let ns_group = NameServerConfigGroup::from_ips_clear(&[ip, ip], 53, true);
        let config = ResolverConfig::from_parts(None, vec![], ns_group);
        let ips = dedup_ips(&config);
        assert_eq!(
            ips.iter().filter(|&x| x == "1.2.3.4").count(),
            1,
            "Duplicate IPs should be deduplicated"
        );
    }

    #[test]
    fn test_polling_opts_disable_caching() {
        let opts = polling_opts(ResolverOpts::default());
        assert_eq!(opts.positive_max_ttl, Some(Duration::ZERO));
        assert_eq!(opts.negative_max_ttl, Some(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_build_resolver_for_ns_with_ip() {
        let ip: IpAddr = "1.1.1.1".parse().unwrap();
        let _resolver = build_resolver_for_ns(Some(ip));
    }

    #[tokio::test]
    async fn test_build_resolver_for_ns_without_ip() {
        // Falls back to the system resolver
        let _resolver = build_resolver_for_ns(None);
    }

    #[test]
    fn test_parse_nameserver() {
        assert_eq!(
            parse_nameserver(" 8.8.8.8 ").unwrap(),
            "8.8.8.8".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            parse_nameserver("2606:4700::1111").unwrap(),
            "2606:4700::1111".parse::<IpAddr>().unwrap()
        );
        assert!(matches!(
            parse_nameserver("dns.google"),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_system_dns_label_not_empty() {
        let label = &*SYSTEM_DNS_LABEL;
        assert!(!label.is_empty(), "SYSTEM_DNS_LABEL should not be empty");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_resolve_txt_real() {
        let records = DEFAULT_RESOLVER.resolve_txt("google.com").await.unwrap();
        assert!(!records.is_empty());
    }
}
