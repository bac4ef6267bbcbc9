//! File preview CLI command.
//!
//! Streams the blob to stdout (for piping into a viewer); the content-type
//! hint goes to stderr so the byte stream stays clean.

use anyhow::Context;
use clap::Args;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use vault_core::types::Principal;
use vault_service::VaultService;

/// Arguments for the preview command
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Storage key of the file to preview
    pub key: String,
}

/// Execute the preview command
pub async fn execute(
    service: &VaultService,
    principal: &Principal,
    args: &PreviewArgs,
) -> anyhow::Result<()> {
    let preview = service.preview(principal, &args.key).await?;
    eprintln!("Content-Type: {}", preview.content_type);

    let mut stdout = tokio::io::stdout();
    let mut stream = preview.stream;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed while reading blob stream")?;
        stdout
            .write_all(&chunk)
            .await
            .context("Failed to write to stdout")?;
    }
    stdout.flush().await.context("Failed to flush stdout")?;
    Ok(())
}
