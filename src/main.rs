//! SecureVault operator CLI.
//!
//! Stands in for the transport layer: identity arrives as already-decoded
//! `--email`/`--claims` values (what the SSO integration would supply) and
//! every subcommand goes through the vault service.

use clap::Parser;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
