//! 验证轮询的错误类型
//!
//! Lookup failures never leave [`verify_record`](crate::verify_record); they are
//! only visible to [`TxtResolver`](crate::TxtResolver) implementations and in logs.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// Caller input that cannot be used (e.g. a nameserver that is not an IP)
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// TXT lookup failed: NXDOMAIN, no answer, SERVFAIL, unreachable server
    #[error("DNS lookup failed: {0}")]
    NetworkError(String),
}

pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
