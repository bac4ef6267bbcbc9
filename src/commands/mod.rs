//! CLI command definitions and shared wiring.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vault_auth::{AccessController, ClaimsMapper};
use vault_core::config::VaultConfig;
use vault_metadata::JsonMetadataStore;
use vault_service::VaultService;
use vault_storage::LocalBlobStore;

pub mod delete;
pub mod download;
pub mod list;
pub mod preview;
pub mod upload;

/// SecureCloud Vault operator CLI.
#[derive(Debug, Parser)]
#[command(name = "vault", about = "SecureCloud Vault — shared document vault", version)]
pub struct Cli {
    /// Email of the acting principal (as decoded by the identity provider).
    #[arg(long, env = "VAULT_EMAIL")]
    pub email: String,

    /// Role claim strings presented by the identity provider,
    /// comma-separated.
    #[arg(long, env = "VAULT_CLAIMS", value_delimiter = ',')]
    pub claims: Vec<String>,

    /// Configuration environment overlay to load (config/<env>.toml).
    #[arg(long, env = "VAULT_ENV", default_value = "development")]
    pub env: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a file into the vault
    Upload(upload::UploadArgs),
    /// List files in the vault
    List(list::ListArgs),
    /// Download a file as an attachment
    Download(download::DownloadArgs),
    /// Stream a previewable file (image or PDF) to stdout
    Preview(preview::PreviewArgs),
    /// Delete a file from the vault
    Delete(delete::DeleteArgs),
}

impl Cli {
    /// Load configuration, build the vault, and dispatch the subcommand.
    pub async fn execute(self) -> anyhow::Result<()> {
        let config = VaultConfig::load(&self.env)?;
        init_logging(&config);

        let principal =
            ClaimsMapper::new(&config.auth.role_claims).resolve(&self.email, &self.claims);
        let service = build_vault(&config).await?;

        match &self.command {
            Commands::Upload(args) => upload::execute(&service, &principal, args).await,
            Commands::List(args) => list::execute(&service, &principal, args).await,
            Commands::Download(args) => download::execute(&service, &principal, args).await,
            Commands::Preview(args) => preview::execute(&service, &principal, args).await,
            Commands::Delete(args) => delete::execute(&service, &principal, args).await,
        }
    }
}

/// Initialize tracing/logging from configuration.
fn init_logging(config: &VaultConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Build the vault service over the configured local stores.
async fn build_vault(config: &VaultConfig) -> anyhow::Result<VaultService> {
    let blob = Arc::new(LocalBlobStore::new(&config.storage.upload_root).await?);
    let metadata = Arc::new(JsonMetadataStore::new(&config.storage.metadata_root).await?);
    Ok(VaultService::new(
        blob,
        metadata,
        AccessController::new(),
        config.storage.clone(),
    ))
}
