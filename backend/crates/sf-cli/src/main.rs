//! reconcile-identity - storefront identity reconciliation
//!
//! Folds every identity row for one email into a single canonical identity,
//! repointing orders, reviews and every other dependent record on the way.
//!
//! # Examples
//!
//! ```bash
//! # Reconcile one address
//! reconcile-identity alice@example.com
//!
//! # See what would change first
//! reconcile-identity --dry-run --pretty Alice@Example.com
//! ```

use sf_cli::{Cli, CliResult, DryRunOutput, FailureOutput, SuccessOutput, logger, to_json};
use sf_config::Config;
use sf_core::NormalizedEmail;
use sf_idp::{AuthAdminClient, ProviderLookup, RetryPolicy};
use sf_reconcile::{ReconcileError, Reconciler};

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let failure = FailureOutput::new(&e);
            match to_json(&failure, cli.pretty) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CliResult<String> {
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting reconcile-identity v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Rejected before any connection is opened
    let email = NormalizedEmail::parse(&cli.email)?;

    let database_path = match cli.database {
        Some(ref path) => path.clone(),
        None => config.database_path()?,
    };
    let pool = sf_db::open_pool(&database_path).await?;

    let provider = AuthAdminClient::from_config(&config.identity_provider)?;
    let reconciler = Reconciler::new(
        pool.clone(),
        Arc::new(provider),
        ProviderLookup::from_config(&config.identity_provider),
        RetryPolicy::from(&config.retry),
    );

    let json = if cli.dry_run {
        let plan = reconciler.plan(&email).await.inspect_err(report_failure)?;
        to_json(&DryRunOutput::from(&plan), cli.pretty)?
    } else {
        let report = reconciler.run(&email).await.inspect_err(report_failure)?;
        to_json(&SuccessOutput::from(&report), cli.pretty)?
    };

    pool.close().await;

    Ok(json)
}

fn report_failure(e: &ReconcileError) {
    let stage = e.stage();
    if stage.may_have_written() {
        warn!(
            "Run stopped at the {} step after earlier steps were committed; re-run the same email to finish",
            stage
        );
    }
    error!("Reconciliation failed at {}: {}", stage, e);
}
