//! Depot Downloader Library
//!
//! Launch-time orchestration for a content download tool: validates the
//! command line into a download request, resolves how to log in, dispatches
//! to one of three download modes and keeps small pieces of state between
//! runs (remembered logins, installed manifest versions).

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(DEFAULT_BRANCH, "public");
        assert_eq!(DEPOT_CONFIG_FILE, "depot.config");
    }

    #[test]
    fn test_error_types() {
        let store_error = errors::StoreError::AlreadyLoaded { kind: "account" };
        let app_error = AppError::Store(store_error);

        assert_eq!(app_error.category(), "store");
        assert!(!app_error.is_declared());
    }
}
