//! Command-line interface components
//!
//! This module contains CLI-specific code for Depot Downloader: argument
//! parsing and validation, logging setup, and the handlers that run a
//! validated launch.

pub mod args;
pub mod commands;
pub mod logging;

pub use args::{normalize_legacy_flags, Cli};
pub use commands::{handle_launch, prepare_launch, print_version, LaunchPlan};
pub use logging::{init_logging, LogLevelHandle};
