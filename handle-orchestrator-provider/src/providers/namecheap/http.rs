//! Namecheap HTTP 请求方法

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::params::auth_params;
use super::{NAMECHEAP_PROVIDER, NamecheapProvider};

impl NamecheapProvider {
    /// 执行 Namecheap XML API 请求
    ///
    /// Auth parameters and `Command` go first, `params` follow in order.
    /// Returns the raw XML body.
    pub(crate) async fn request(
        &self,
        command: &str,
        params: &[(String, String)],
    ) -> Result<String> {
        let mut query = auth_params(&self.credentials, command);
        query.extend_from_slice(params);

        let request = self.client.get(&self.base_url).query(&query);

        HttpUtils::execute_request(request, NAMECHEAP_PROVIDER, "GET", command).await
    }
}
