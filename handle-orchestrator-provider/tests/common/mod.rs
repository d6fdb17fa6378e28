//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use handle_orchestrator_provider::{NamecheapCredentials, NamecheapProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// Path the mock registrar serves, matching the real endpoint's.
pub const API_PATH: &str = "/xml.response";

pub const GET_HOSTS: &str = "namecheap.domains.dns.getHosts";
pub const SET_HOSTS: &str = "namecheap.domains.dns.setHosts";

/// Registrar success document for `getHosts`.
pub const GET_HOSTS_OK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <RequestedCommand>namecheap.domains.dns.getHosts</RequestedCommand>
  <CommandResponse Type="namecheap.domains.dns.getHosts">
    <DomainDNSGetHostsResult Domain="example.com" IsUsingOurDNS="true">
      <host HostId="12" Name="@" Type="A" Address="192.0.2.1" MXPref="10" TTL="1800" />
    </DomainDNSGetHostsResult>
  </CommandResponse>
</ApiResponse>"#;

/// Registrar success document for `setHosts`.
pub const SET_HOSTS_OK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <RequestedCommand>namecheap.domains.dns.setHosts</RequestedCommand>
  <CommandResponse Type="namecheap.domains.dns.setHosts">
    <DomainDNSSetHostsResult Domain="example.com" IsSuccess="true" />
  </CommandResponse>
</ApiResponse>"#;

/// Registrar error document (still served with HTTP 200).
pub const API_ERROR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011102">Parameter APIKey is invalid</Error>
  </Errors>
</ApiResponse>"#;

pub fn test_credentials() -> NamecheapCredentials {
    NamecheapCredentials::new("alice", "k3y-secret", "203.0.113.7")
}

/// Provider pointed at the mock server.
pub fn provider_for(server: &MockServer) -> NamecheapProvider {
    NamecheapProvider::builder(test_credentials())
        .base_url(format!("{}{API_PATH}", server.uri()))
        .build()
        .expect("build provider")
}

/// Mount a handler for `command` answering `status` with `body`.
pub async fn mount_command(server: &MockServer, command: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("Command", command))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Query pairs of the single request the mock server received, in order.
pub async fn single_request_query(server: &MockServer) -> Vec<(String, String)> {
    let requests: Vec<Request> = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one outbound request");
    requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn query_value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// 真实注册商测试上下文
pub struct LiveContext {
    pub provider: NamecheapProvider,
    pub domain: String,
}

impl LiveContext {
    /// 从环境变量创建（默认使用 sandbox）
    pub fn from_env() -> Option<Self> {
        let credentials = NamecheapCredentials::from_env().ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let sandbox = env::var("NAMECHEAP_PRODUCTION").is_err();
        let provider = NamecheapProvider::builder(credentials)
            .sandbox(sandbox)
            .build()
            .ok()?;

        Some(Self { provider, domain })
    }
}
