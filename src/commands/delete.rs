//! File deletion CLI command.

use clap::Args;
use dialoguer::Confirm;

use vault_core::types::Principal;
use vault_service::VaultService;

use crate::output;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Storage key of the file to delete
    pub key: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the delete command
pub async fn execute(
    service: &VaultService,
    principal: &Principal,
    args: &DeleteArgs,
) -> anyhow::Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete '{}'?", args.key))
            .default(false)
            .interact()?;
        if !confirmed {
            output::print_warning("Delete aborted");
            return Ok(());
        }
    }

    service.delete(principal, &args.key).await?;
    output::print_success(&format!("Deleted '{}'", args.key));
    Ok(())
}
