//! File listing CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vault_core::types::Principal;
use vault_service::VaultService;

use crate::output::{self, OutputFormat};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// One row of the listing table.
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Display name.
    #[tabled(rename = "Name")]
    name: String,
    /// Uploader.
    #[tabled(rename = "Uploaded by")]
    owner: String,
    /// Upload time.
    #[tabled(rename = "Date")]
    uploaded: String,
    /// Human-readable size.
    #[tabled(rename = "Size")]
    size: String,
    /// Storage key for download/preview/delete.
    #[tabled(rename = "Storage key")]
    key: String,
}

/// Execute the list command
pub async fn execute(
    service: &VaultService,
    principal: &Principal,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let listing = service.list(principal).await?;

    let rows: Vec<FileRow> = listing
        .records
        .iter()
        .map(|r| FileRow {
            name: r.original_filename.clone(),
            owner: r.owner_email.clone(),
            uploaded: r.uploaded_at.format("%b %d, %Y at %H:%M").to_string(),
            size: output::format_size(r.size_bytes),
            key: r.storage_key.clone(),
        })
        .collect();

    output::print_list(&rows, args.format);

    if listing.corrupt_records > 0 {
        output::print_warning(&format!(
            "{} corrupt metadata entr{} skipped",
            listing.corrupt_records,
            if listing.corrupt_records == 1 { "y" } else { "ies" }
        ));
    }
    if listing.missing_blobs > 0 {
        output::print_warning(&format!(
            "{} record(s) have a missing blob and were omitted",
            listing.missing_blobs
        ));
    }
    Ok(())
}
