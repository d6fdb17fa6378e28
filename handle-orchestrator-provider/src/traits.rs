use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecordType, HostRecord};

/// Host label of the AT Protocol handle verification record.
pub const ATPROTO_HOST: &str = "_atproto";

/// Prefix of the verification record value (`did=<did>`).
pub const DID_PREFIX: &str = "did=";

/// Build the `_atproto` TXT record that proves control of a domain for `did`.
pub fn verification_record(did: &str) -> HostRecord {
    HostRecord::new(ATPROTO_HOST, DnsRecordType::Txt, format!("{DID_PREFIX}{did}"))
        .with_ttl(crate::types::DEFAULT_TTL)
}

/// 域名注册商 Trait
///
/// Responses are the registrar's raw bodies. Nothing inspects them, so a
/// request the registrar rejected (bad credentials, unknown domain) still
/// comes back as `Ok`. Only transport failures are errors.
#[async_trait]
pub trait RegistrarClient: Send + Sync {
    /// 注册商标识符
    fn id(&self) -> &'static str;

    /// 获取域名的全部主机记录（原始响应）
    async fn fetch_records(&self, domain: &str) -> Result<String>;

    /// 用 `records` 整体替换域名的全部主机记录（原始响应）
    ///
    /// Every record not in `records` is deleted by the registrar.
    async fn replace_all_records(&self, domain: &str, records: &[HostRecord]) -> Result<String>;

    /// Publish `_atproto TXT did=<did>` as the domain's only host record.
    ///
    /// This discards every other record on the domain (A, MX, CNAME, ...).
    async fn publish_verification_record(&self, domain: &str, did: &str) -> Result<()> {
        let record = verification_record(did);
        log::info!(
            "[{}] Publishing {ATPROTO_HOST} TXT record for {domain}, replacing all existing host records",
            self.id()
        );
        self.replace_all_records(domain, std::slice::from_ref(&record))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingRegistrar {
        submitted: Mutex<Vec<(String, Vec<HostRecord>)>>,
    }

    #[async_trait]
    impl RegistrarClient for RecordingRegistrar {
        fn id(&self) -> &'static str {
            "recording"
        }

        async fn fetch_records(&self, _domain: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn replace_all_records(
            &self,
            domain: &str,
            records: &[HostRecord],
        ) -> Result<String> {
            self.submitted
                .lock()
                .unwrap()
                .push((domain.to_string(), records.to_vec()));
            Ok("<ApiResponse Status=\"OK\"/>".to_string())
        }
    }

    #[test]
    fn verification_record_shape() {
        let record = verification_record("plc:abc123");
        assert_eq!(record.host_name, "_atproto");
        assert_eq!(record.record_type, DnsRecordType::Txt);
        assert_eq!(record.address, "did=plc:abc123");
        assert_eq!(record.ttl, Some(60));
    }

    #[tokio::test]
    async fn publish_submits_exactly_one_record() {
        let registrar = RecordingRegistrar::default();
        registrar
            .publish_verification_record("example.com", "plc:abc123")
            .await
            .unwrap();

        let submitted = registrar.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let (domain, records) = &submitted[0];
        assert_eq!(domain, "example.com");
        assert_eq!(records.as_slice(), &[verification_record("plc:abc123")]);
    }
}
