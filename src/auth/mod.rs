//! Authentication for content sessions
//!
//! This module decides how a run logs in (anonymous, remembered token, QR
//! code, supplied or prompted password) and provides the password input
//! strategies used when a prompt is needed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use depot_downloader::app::models::CredentialInput;
//! use depot_downloader::app::store::AccountSettings;
//! use depot_downloader::auth::{resolve_login, stdin_prompt};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let input = CredentialInput {
//!     username: Some("player".to_string()),
//!     ..Default::default()
//! };
//! let mut prompt = stdin_prompt();
//! let (state, login) = resolve_login(&input, &AccountSettings::default(), None, prompt.as_mut())?;
//! println!("{:?} as {:?}", state, login.username);
//! # Ok(())
//! # }
//! ```

pub mod orchestrator;
pub mod prompt;

// Re-export main public API
pub use orchestrator::{resolve_login, AuthState, SessionLogin};
pub use prompt::{stdin_prompt, LinePrompt, MaskedPrompt, PasswordPrompt};
