//! Command handlers for Depot Downloader
//!
//! This module turns the raw argument vector into either an immediate exit
//! code (usage, version, validation failure) or a validated launch, and runs
//! a launch against a content client with the persistent stores loaded.

use clap::error::ErrorKind;
use clap::CommandFactory;
use tracing::{debug, info, warn};

use crate::app::client::ContentClient;
use crate::app::dispatcher::dispatch;
use crate::app::models::Launch;
use crate::app::store::Stores;
use crate::auth::PasswordPrompt;
use crate::cli::args::Cli;
use crate::config::AppConfig;
use crate::constants::exit;
use crate::errors::{ConfigError, Result};

/// What to do after looking at the command line
#[derive(Debug)]
pub enum LaunchPlan {
    /// Nothing to download; exit with this code
    Exit(i32),
    /// A validated launch and the configuration it was built with
    Ready { launch: Launch, config: AppConfig },
}

/// Parse and validate the command line (without the program name)
///
/// Usage, version and validation problems are printed here and resolved
/// into [`LaunchPlan::Exit`].
pub fn prepare_launch<S: AsRef<str>>(args: &[S]) -> Result<LaunchPlan> {
    if args.is_empty() {
        print_version(false);
        println!();
        Cli::command().print_help()?;
        return Ok(LaunchPlan::Exit(exit::SUCCESS));
    }

    let cli = match Cli::try_parse_legacy(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(LaunchPlan::Exit(exit::SUCCESS));
        }
        Err(e) => return Ok(report_config_error(ConfigError::from(e))),
    };

    if cli.version {
        print_version(true);
        return Ok(LaunchPlan::Exit(exit::SUCCESS));
    }
    if cli.debug {
        print_version(true);
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return Ok(report_config_error(e)),
    };

    match cli.into_launch(&config.download) {
        Ok(launch) => Ok(LaunchPlan::Ready { launch, config }),
        Err(e) => Ok(report_config_error(e)),
    }
}

/// Load the stores, dispatch the launch and flush the stores
///
/// Stores are only written when the dispatch ends without an unexpected
/// fault.
pub async fn handle_launch<C: ContentClient + ?Sized>(
    launch: &Launch,
    config: &AppConfig,
    client: &C,
    prompt: &mut dyn PasswordPrompt,
) -> Result<i32> {
    let mut stores = Stores::load(&config.storage, launch.request.install_dir())?;
    debug!(
        "Stores loaded: accounts={:?} depots={:?}",
        stores.accounts.path(),
        stores.depots.path()
    );

    let outcome = dispatch(client, launch, &mut stores, prompt).await?;
    stores.save()?;

    if outcome.is_success() {
        info!("Run finished");
    } else {
        warn!("Run finished without completing: {:?}", outcome);
    }
    Ok(outcome.exit_code())
}

fn report_config_error(error: ConfigError) -> LaunchPlan {
    warn!("Invalid arguments: {}", error);
    println!("Error: {}", error);
    LaunchPlan::Exit(exit::FAILURE)
}

/// Print the program version, optionally with runtime details
pub fn print_version(extended: bool) {
    println!("DepotDownloader v{}", env!("CARGO_PKG_VERSION"));

    if extended {
        println!(
            "Runtime: {} {} ({})",
            std::env::consts::OS,
            std::env::consts::ARCH,
            std::env::consts::FAMILY
        );
    }
}
