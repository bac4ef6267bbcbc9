//! File upload CLI command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio_util::io::ReaderStream;

use vault_core::traits::blob::ByteStream;
use vault_core::types::Principal;
use vault_service::VaultService;

use crate::output;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Override the stored display name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Execute the upload command
pub async fn execute(
    service: &VaultService,
    principal: &Principal,
    args: &UploadArgs,
) -> anyhow::Result<()> {
    let file = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let declared_size = file
        .metadata()
        .await
        .with_context(|| format!("Failed to stat {}", args.file.display()))?
        .len();

    let filename = args.name.clone().unwrap_or_else(|| {
        args.file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    });

    let stream: ByteStream = Box::pin(ReaderStream::new(file));
    let record = service
        .upload(principal, &filename, stream, declared_size)
        .await?;

    output::print_success(&format!("Uploaded '{}'", record.original_filename));
    output::print_kv("Storage key", &record.storage_key);
    output::print_kv("Owner", &record.owner_email);
    output::print_kv("Size", &output::format_size(record.size_bytes));
    output::print_kv("Uploaded at", &record.uploaded_at.to_rfc3339());
    Ok(())
}
