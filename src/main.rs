//! Depot Downloader CLI application
//!
//! Command-line launcher that validates arguments, logs in and dispatches a
//! depot, published file or UGC download.

use std::process;

use tracing::{error, info, warn};

use depot_downloader::app::DryRunClient;
use depot_downloader::auth::stdin_prompt;
use depot_downloader::cli::{handle_launch, init_logging, prepare_launch, LaunchPlan};
use depot_downloader::constants::config::DEFAULT_LOG_LEVEL;
use depot_downloader::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(code) => process::exit(code),
        Err(e) if e.is_declared() => {
            warn!(category = e.category(), "Run failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            error!(category = e.category(), "Fatal error: {:?}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Main application logic
async fn run() -> Result<i32> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Installed before parsing so validation and config diagnostics are kept
    let logging = init_logging(DEFAULT_LOG_LEVEL);

    let args: Vec<String> = std::env::args().skip(1).collect();

    let (launch, config) = match prepare_launch(&args)? {
        LaunchPlan::Exit(code) => return Ok(code),
        LaunchPlan::Ready { launch, config } => (launch, config),
    };

    logging.set_level(if launch.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    });

    info!("DepotDownloader v{} starting", env!("CARGO_PKG_VERSION"));
    info!("No content transport linked; running in dry-run mode");

    let client = DryRunClient::new();
    let mut prompt = stdin_prompt();
    handle_launch(&launch, &config, &client, prompt.as_mut()).await
}
