//! DNS polling for AT Protocol handle verification
//!
//! 轮询 `_atproto.<domain>` 的 TXT 记录，直到出现 `did=<did>` 或重试次数耗尽。
//! 查询失败一律视为"尚未生效"，不会向调用方返回错误。

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{verify_record, verify_record_with_cancel, ToolboxService, TxtResolver};
pub use types::{
    VerificationOutcome, VerificationTarget, ATPROTO_LABEL, DEFAULT_DELAY, DEFAULT_RETRIES,
    DID_PREFIX, QUERY_TIMEOUT_SECS,
};
