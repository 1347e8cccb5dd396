//! Core application logic for Depot Downloader
//!
//! This module contains the request models, the file list filter, the
//! persistent stores, the content client seam and the dispatcher that ties
//! them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use depot_downloader::app::{dispatch, DryRunClient, Stores};
//! use depot_downloader::auth::stdin_prompt;
//! use depot_downloader::cli::Cli;
//! use depot_downloader::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let launch = Cli::try_parse_legacy(["-app", "730", "-depot", "731"])?
//!     .into_launch(&config.download)?;
//!
//! let mut stores = Stores::load(&config.storage, launch.request.install_dir())?;
//! let outcome = dispatch(&DryRunClient::new(), &launch, &mut stores, stdin_prompt().as_mut()).await?;
//! stores.save()?;
//! println!("exit code {}", outcome.exit_code());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dispatcher;
pub mod filelist;
pub mod models;
pub mod platform;
pub mod store;

// Re-export main public API
pub use client::{ContentClient, DryRunClient};
pub use dispatcher::{dispatch, DispatchOutcome};
pub use filelist::FileFilter;
pub use models::{
    ConcurrencyLimits, CredentialInput, DepotManifest, DownloadRequest, DownloadSettings, Launch,
    LaunchRequest, WorkshopItem, WorkshopItemRequest,
};
pub use platform::set_executable;
pub use store::{AccountSettings, DepotConfig, PersistentStore, Stores};
