//! Prelude module for Depot Downloader Library
//!
//! Re-exports the items needed to embed the launcher with a custom content
//! client via a single `use depot_downloader::prelude::*;` statement.

// Core result types
pub use crate::errors::{AppError, DownloadError, DownloadResult, Result};

// Requests and dispatch
pub use crate::app::{
    dispatch, ContentClient, DepotConfig, DispatchOutcome, DownloadRequest, DownloadSettings,
    Launch, LaunchRequest, Stores, WorkshopItem,
};

// Authentication
pub use crate::auth::{stdin_prompt, PasswordPrompt, SessionLogin};

// Command line and configuration
pub use crate::cli::{handle_launch, prepare_launch, LaunchPlan};
pub use crate::config::AppConfig;
