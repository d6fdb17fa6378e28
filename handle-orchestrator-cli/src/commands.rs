//! Command dispatch.

use std::process::ExitCode;

use anyhow::{Context, Result};
use handle_orchestrator_provider::{NamecheapProvider, RegistrarClient};
use handle_orchestrator_toolbox::{ToolboxService, VerificationOutcome, VerificationTarget};

use crate::args::{Cli, Commands, PublishArgs, RecordsArgs};

/// Exit code for a run interrupted by Ctrl-C (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Publish(ref args) => publish(&cli, args).await,
        Commands::Verify(ref args) => {
            Ok(verify(&args.polling.target(&args.domain, &args.did)).await)
        }
        Commands::Records(ref args) => records(&cli, args).await,
    }
}

fn registrar(cli: &Cli) -> Result<NamecheapProvider> {
    let credentials = cli
        .credentials
        .to_credentials()
        .context("Namecheap credentials are incomplete")?;
    let provider = NamecheapProvider::builder(credentials)
        .sandbox(cli.sandbox)
        .build()?;
    tracing::debug!("Using registrar endpoint {}", provider.base_url());
    Ok(provider)
}

async fn publish(cli: &Cli, args: &PublishArgs) -> Result<ExitCode> {
    let provider = registrar(cli)?;

    tracing::warn!(
        "Replacing ALL host records of {} with the _atproto TXT record",
        args.domain
    );
    provider
        .publish_verification_record(&args.domain, &args.did)
        .await
        .with_context(|| format!("Failed to publish verification record for {}", args.domain))?;
    tracing::info!("Published _atproto.{} -> did={}", args.domain, args.did);

    if args.no_verify {
        return Ok(ExitCode::SUCCESS);
    }
    Ok(verify(&args.polling.target(&args.domain, &args.did)).await)
}

async fn verify(target: &VerificationTarget) -> ExitCode {
    match target.nameserver {
        Some(ns) => tracing::info!("Polling {} via {ns}", target.record_name()),
        None => tracing::info!(
            "Polling {} via system resolver ({})",
            target.record_name(),
            ToolboxService::system_nameservers()
        ),
    }

    let outcome = ToolboxService::verify_with_cancel(target, interrupted()).await;
    report(target, outcome)
}

fn report(target: &VerificationTarget, outcome: VerificationOutcome) -> ExitCode {
    match outcome {
        VerificationOutcome::Verified { attempts } => {
            tracing::info!(
                "{} verified on {} after {attempts} attempt(s)",
                target.expected,
                target.record_name()
            );
            ExitCode::SUCCESS
        }
        VerificationOutcome::Exhausted { attempts } => {
            tracing::error!(
                "{} not visible on {} after {attempts} attempt(s)",
                target.expected,
                target.record_name()
            );
            ExitCode::FAILURE
        }
        VerificationOutcome::Cancelled { attempts } => {
            tracing::warn!("Interrupted after {attempts} attempt(s)");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

async fn records(cli: &Cli, args: &RecordsArgs) -> Result<ExitCode> {
    let provider = registrar(cli)?;
    let body = provider
        .fetch_records(&args.domain)
        .await
        .with_context(|| format!("Failed to fetch host records for {}", args.domain))?;
    println!("{body}");
    Ok(ExitCode::SUCCESS)
}
