//! Command-line argument definitions using clap.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use handle_orchestrator_provider::{
    CredentialValidationError, NamecheapCredentials, ENV_API_KEY, ENV_API_USER, ENV_CLIENT_IP,
    ENV_USER_NAME,
};
use handle_orchestrator_toolbox::{
    ToolboxService, VerificationTarget, DEFAULT_RETRIES, QUERY_TIMEOUT_SECS,
};

/// Publish and verify the `_atproto` TXT record that ties a domain to a DID.
///
/// WARNING: `publish` replaces every host record on the domain.
#[derive(Parser, Debug)]
#[command(name = "handle-orchestrator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Use the Namecheap sandbox endpoint
    #[arg(long, global = true)]
    pub sandbox: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Namecheap API user
    #[arg(long, env = ENV_API_USER, global = true)]
    pub api_user: Option<String>,

    /// Namecheap API key
    #[arg(long, env = ENV_API_KEY, global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Whitelisted client IP
    #[arg(long, env = ENV_CLIENT_IP, global = true)]
    pub client_ip: Option<String>,

    /// Account user name, when it differs from the API user
    #[arg(long, env = ENV_USER_NAME, global = true)]
    pub user_name: Option<String>,
}

impl CredentialArgs {
    pub fn to_credentials(&self) -> Result<NamecheapCredentials, CredentialValidationError> {
        let map: HashMap<String, String> = [
            ("apiUser", &self.api_user),
            ("apiKey", &self.api_key),
            ("clientIp", &self.client_ip),
            ("userName", &self.user_name),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
        .collect();

        NamecheapCredentials::from_map(&map)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace all host records with `_atproto TXT did=<did>`, then wait for it in DNS
    Publish(PublishArgs),

    /// Wait for `_atproto.<domain>` to carry `did=<did>`
    Verify(VerifyArgs),

    /// Print the raw getHosts response
    Records(RecordsArgs),
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Domain to publish on
    pub domain: String,

    /// DID the handle points to (e.g. did:plc:...)
    pub did: String,

    /// Skip DNS verification after publishing
    #[arg(long)]
    pub no_verify: bool,

    #[command(flatten)]
    pub polling: PollingArgs,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Domain to check
    pub domain: String,

    /// Expected DID
    pub did: String,

    #[command(flatten)]
    pub polling: PollingArgs,
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Domain to list
    pub domain: String,
}

#[derive(Args, Debug)]
pub struct PollingArgs {
    /// Maximum number of lookups
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Seconds to wait between lookups
    #[arg(long, default_value_t = 30)]
    pub delay_secs: u64,

    /// Query this nameserver IP instead of the system resolver
    #[arg(long, value_parser = parse_nameserver)]
    pub nameserver: Option<IpAddr>,
}

impl PollingArgs {
    pub fn target(&self, domain: &str, did: &str) -> VerificationTarget {
        VerificationTarget::new(domain, did)
            .with_retries(self.retries)
            .with_delay(Duration::from_secs(self.delay_secs))
            .with_nameserver(self.nameserver)
            .with_query_timeout(Duration::from_secs(QUERY_TIMEOUT_SECS))
    }
}

fn parse_nameserver(value: &str) -> Result<IpAddr, String> {
    ToolboxService::parse_nameserver(value).map_err(|e| e.to_string())
}
