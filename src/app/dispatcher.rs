//! Download mode dispatch
//!
//! Runs the login flow, opens the content session and hands the validated
//! request to exactly one collaborator operation. Declared failures
//! (content errors, cancellation) become a printed line and exit code 1;
//! anything else is logged in full and returned as an error.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::app::client::ContentClient;
use crate::app::models::{Launch, LaunchRequest, WorkshopItem};
use crate::app::store::Stores;
use crate::auth::{resolve_login, PasswordPrompt};
use crate::constants::exit;
use crate::errors::{AppError, Result};

/// Result of a dispatched run that did not hit an unexpected fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The download operation finished
    Completed,
    /// Credentials could not be obtained or the session was rejected
    LoginFailed,
    /// A declared download failure, with its message
    Failed(String),
}

impl DispatchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchOutcome::Completed => exit::SUCCESS,
            DispatchOutcome::LoginFailed | DispatchOutcome::Failed(_) => exit::FAILURE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Completed)
    }
}

/// Shuts the session down when dropped
struct SessionGuard<'a, C: ContentClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ContentClient + ?Sized> SessionGuard<'a, C> {
    fn new(client: &'a C) -> Self {
        Self { client }
    }
}

impl<C: ContentClient + ?Sized> Drop for SessionGuard<'_, C> {
    fn drop(&mut self) {
        debug!("Shutting down content session");
        self.client.shutdown();
    }
}

/// Authenticate and run the requested download mode
///
/// `stores` must be loaded. The version store is handed to the collaborator
/// for mutation but not saved here.
pub async fn dispatch<C: ContentClient + ?Sized>(
    client: &C,
    launch: &Launch,
    stores: &mut Stores,
    prompt: &mut dyn PasswordPrompt,
) -> Result<DispatchOutcome> {
    let _session = SessionGuard::new(client);
    let request = &launch.request;

    let (state, login) = match resolve_login(
        &launch.credentials,
        stores.accounts.get()?,
        request.settings().login_id,
        prompt,
    ) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!("Authentication aborted: {}", e);
            println!("Error: {}", e);
            return Ok(DispatchOutcome::LoginFailed);
        }
    };
    info!("Logging in ({:?})", state);

    let spinner = connecting_spinner();
    let connected = client.session_init(&login).await;
    spinner.finish_and_clear();

    if !connected {
        warn!("Session initialisation rejected");
        println!("Error: Failed to initialise the content session");
        return Ok(DispatchOutcome::LoginFailed);
    }

    info!(
        "Dispatching {} download for app {}",
        request.mode(),
        request.app_id()
    );
    let versions = stores.depots.get_mut()?;
    let result = match request {
        LaunchRequest::Depot(download) => client.download_app(download, versions).await,
        LaunchRequest::Workshop(workshop) => match workshop.item {
            WorkshopItem::PublishedFile(id) => {
                client
                    .download_pubfile(workshop.app_id, id, &workshop.settings, versions)
                    .await
            }
            WorkshopItem::Ugc(id) => {
                client
                    .download_ugc(workshop.app_id, id, &workshop.settings, versions)
                    .await
            }
        },
    };

    match result {
        Ok(()) => {
            info!("Download finished");
            Ok(DispatchOutcome::Completed)
        }
        Err(e) if e.is_declared() => {
            warn!("Download failed: {}", e);
            println!("{}", e);
            Ok(DispatchOutcome::Failed(e.to_string()))
        }
        Err(e) => {
            error!("Download failed due to an unhandled error: {:?}", e);
            println!("Download failed due to an unhandled error: {}", e);
            Err(AppError::Download(e))
        }
    }
}

fn connecting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_strings(&["◐", "◓", "◑", "◒", "●"]));
    }
    spinner.set_message("Connecting to content service...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
