//! Application constants for Depot Downloader
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

/// Download request defaults
pub mod download {
    /// Branch used when neither -branch nor -beta is given
    pub const DEFAULT_BRANCH: &str = "public";

    /// Default maximum number of content servers
    pub const DEFAULT_MAX_SERVERS: u32 = 20;

    /// Default maximum number of concurrent chunk downloads
    pub const DEFAULT_MAX_DOWNLOADS: u32 = 8;

    /// Legacy cell id meaning "let the service pick"
    pub const UNSET_CELL_ID: i64 = -1;
}

/// Persistent store locations
pub mod storage {
    /// Token store file, relative to the working directory
    pub const ACCOUNT_CONFIG_FILE: &str = "account.config";

    /// Per-install metadata directory
    pub const DEPOT_CONFIG_DIR: &str = ".DepotDownloader";

    /// Version store file inside the metadata directory
    pub const DEPOT_CONFIG_FILE: &str = "depot.config";

    /// Install root used when -dir is not given
    pub const DEFAULT_INSTALL_DIR: &str = "depots";
}

/// File list format
pub mod filelist {
    /// Marks a file list line as a case-insensitive regular expression
    pub const REGEX_PREFIX: &str = "regex:";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "depot-downloader.toml";

    /// Directory below the user config dir
    pub const CONFIG_DIR_NAME: &str = "depot-downloader";

    /// File name inside the user config dir
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Log level when none is configured
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// Process exit codes
pub mod exit {
    /// Successful run
    pub const SUCCESS: i32 = 0;

    /// Validation, authentication or declared download failure
    pub const FAILURE: i32 = 1;
}

// Re-export commonly used constants at module level for convenience
pub use download::{DEFAULT_BRANCH, DEFAULT_MAX_DOWNLOADS, DEFAULT_MAX_SERVERS};
pub use storage::{ACCOUNT_CONFIG_FILE, DEPOT_CONFIG_DIR, DEPOT_CONFIG_FILE};
