//! Generic HTTP client tools
//!
//! Reusable request execution for the registrar: sending, status checks,
//! logging and reading the body. The provider builds its own `RequestBuilder`
//! (URL, query parameters) and hands it over.
//!
//! # design principles
//! - **One call, no retry** - a transport failure goes straight back to the caller
//! - **Opaque bodies** - the response text is returned as-is, never parsed here
//! - **Never log the URL** - query strings carry the API key, so only the command is logged

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// 默认连接超时（秒）
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client(
    connect_timeout: Duration,
    timeout: Duration,
    provider_name: &str,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, query, headers)
    /// * `provider_name` - Provider name (for logging and errors)
    /// * `method_name` - request method name (such as "GET", used for logs)
    /// * `action` - registrar command name (for logging)
    ///
    /// # Returns
    /// * `Ok(response_text)` - the raw body of a 2xx response
    /// * `Err(ProviderError::Timeout)` - the request timed out
    /// * `Err(ProviderError::NetworkError)` - connection or body read failure
    /// * `Err(ProviderError::HttpStatus)` - non-2xx status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        action: &str,
    ) -> Result<String> {
        log::debug!("[{provider_name}] {method_name} {action}");

        // Send request
        let response = request_builder.send().await.map_err(|e| {
            let is_timeout = e.is_timeout();
            // reqwest embeds the URL in its message, strip it to keep the key out
            let detail = e.without_url().to_string();
            if is_timeout {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail,
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail,
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{provider_name}] Response Status: {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.ok();
            log::warn!(
                "[{provider_name}] {action} failed with HTTP {}",
                status.as_u16()
            );
            return Err(ProviderError::HttpStatus {
                provider: provider_name.to_string(),
                status: status.as_u16(),
                raw_message: body.map(|b| truncate_for_log(&b)),
            });
        }

        // Read response body
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {}", e.without_url()),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }
}
