//! File download CLI command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use vault_core::types::Principal;
use vault_service::VaultService;

use crate::output;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Storage key of the file to download
    pub key: String,

    /// Output path (defaults to the original filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the download command
pub async fn execute(
    service: &VaultService,
    principal: &Principal,
    args: &DownloadArgs,
) -> anyhow::Result<()> {
    let download = service.download(principal, &args.key).await?;

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&download.original_filename));

    let mut file = tokio::fs::File::create(&out_path)
        .await
        .with_context(|| format!("Failed to create {}", out_path.display()))?;

    let mut stream = download.stream;
    let mut total = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed while reading blob stream")?;
        total += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
    }
    file.flush()
        .await
        .with_context(|| format!("Failed to flush {}", out_path.display()))?;

    output::print_success(&format!(
        "Downloaded '{}' to {} ({})",
        download.original_filename,
        out_path.display(),
        output::format_size(total)
    ));
    Ok(())
}
