//! Polling DNS until the handle verification record shows up.

use std::future::Future;
use std::pin::pin;

use tokio::time::{sleep, timeout};

use crate::types::{VerificationOutcome, VerificationTarget};

use super::resolver::TxtResolver;

/// Concatenate every chunk of every record, in order.
pub(crate) fn flatten_txt(records: &[Vec<String>]) -> String {
    records.iter().flatten().map(String::as_str).collect()
}

/// One bounded lookup. Any failure reads as "not there yet".
async fn attempt<R>(resolver: &R, target: &VerificationTarget, name: &str) -> bool
where
    R: TxtResolver + ?Sized,
{
    match timeout(target.query_timeout, resolver.resolve_txt(name)).await {
        Ok(Ok(records)) => {
            let data = flatten_txt(&records);
            log::debug!("TXT {name}: {data:?}");
            data.contains(&target.expected)
        }
        Ok(Err(e)) => {
            log::debug!("TXT lookup for {name} failed: {e}");
            false
        }
        Err(_) => {
            log::debug!(
                "TXT lookup for {name} timed out after {:?}",
                target.query_timeout
            );
            false
        }
    }
}

/// Poll until `target.expected` appears, giving up after `target.retries` attempts.
pub async fn verify_record<R>(resolver: &R, target: &VerificationTarget) -> bool
where
    R: TxtResolver + ?Sized,
{
    verify_record_with_cancel(resolver, target, std::future::pending::<()>())
        .await
        .is_verified()
}

/// Like [`verify_record`], but stops as soon as `cancel` completes.
///
/// `cancel` is raced against every lookup and every pause between attempts. Pass
/// `tokio::signal::ctrl_c()` for interactive use or a `sleep` for an overall deadline.
pub async fn verify_record_with_cancel<R, C>(
    resolver: &R,
    target: &VerificationTarget,
    cancel: C,
) -> VerificationOutcome
where
    R: TxtResolver + ?Sized,
    C: Future,
{
    let mut cancel = pin!(cancel);
    let name = target.record_name();

    for n in 1..=target.retries {
        log::info!("Checking {name} ({n}/{})", target.retries);

        let found = tokio::select! {
            biased;
            _ = &mut cancel => {
                log::info!("Verification of {name} cancelled");
                return VerificationOutcome::Cancelled { attempts: n - 1 };
            }
            found = attempt(resolver, target, &name) => found,
        };

        if found {
            log::info!("Found {} on {name}", target.expected);
            return VerificationOutcome::Verified { attempts: n };
        }

        if n < target.retries {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    log::info!("Verification of {name} cancelled");
                    return VerificationOutcome::Cancelled { attempts: n };
                }
                () = sleep(target.delay) => {}
            }
        }
    }

    log::warn!(
        "{} not found on {name} after {} attempts",
        target.expected,
        target.retries
    );
    VerificationOutcome::Exhausted {
        attempts: target.retries,
    }
}
