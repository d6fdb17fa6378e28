//! Namecheap `RegistrarClient` 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::RegistrarClient;
use crate::types::HostRecord;

use super::params::{domain_params, host_record_params, split_domain};
use super::{CMD_GET_HOSTS, CMD_SET_HOSTS, NAMECHEAP_PROVIDER, NamecheapProvider};

#[async_trait]
impl RegistrarClient for NamecheapProvider {
    fn id(&self) -> &'static str {
        NAMECHEAP_PROVIDER
    }

    async fn fetch_records(&self, domain: &str) -> Result<String> {
        let split = split_domain(domain)?;
        self.request(CMD_GET_HOSTS, &domain_params(&split)).await
    }

    async fn replace_all_records(&self, domain: &str, records: &[HostRecord]) -> Result<String> {
        let split = split_domain(domain)?;
        if records.is_empty() {
            log::warn!(
                "[{NAMECHEAP_PROVIDER}] Submitting an empty record set for {domain}, every host record will be removed"
            );
        }

        let mut params = domain_params(&split).to_vec();
        params.extend(host_record_params(records));

        log::debug!(
            "[{NAMECHEAP_PROVIDER}] Replacing host records of {domain} with {} record(s)",
            records.len()
        );
        self.request(CMD_SET_HOSTS, &params).await
    }
}
