use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "reconcile-identity")]
#[command(about = "Fold every storefront identity row for an email into one canonical identity")]
#[command(version)]
pub struct Cli {
    /// Email address to reconcile (matched case-insensitively)
    pub email: String,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// SQLite database file (overrides database.path from config)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,
}
