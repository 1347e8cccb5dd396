//! Content service collaborator interface
//!
//! The transport that logs into the content service, downloads, decrypts
//! and verifies chunks lives behind [`ContentClient`]. This crate only
//! decides what to ask for; [`DryRunClient`] is the implementation linked
//! into the binary and reports the resolved plan without transferring data.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::app::models::{DownloadRequest, DownloadSettings};
use crate::app::store::DepotConfig;
use crate::auth::SessionLogin;
use crate::errors::DownloadResult;

/// Operations the dispatcher needs from a content service client
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Log in; `false` means the session could not be established
    async fn session_init(&self, login: &SessionLogin) -> bool;

    /// Download depots of an application, recording completed installs in `versions`
    async fn download_app(
        &self,
        request: &DownloadRequest,
        versions: &mut DepotConfig,
    ) -> DownloadResult<()>;

    /// Download a workshop item addressed by published file id
    async fn download_pubfile(
        &self,
        app_id: u32,
        published_file_id: u64,
        settings: &DownloadSettings,
        versions: &mut DepotConfig,
    ) -> DownloadResult<()>;

    /// Download a workshop item addressed by UGC id
    async fn download_ugc(
        &self,
        app_id: u32,
        ugc_id: u64,
        settings: &DownloadSettings,
        versions: &mut DepotConfig,
    ) -> DownloadResult<()>;

    /// Tear the session down; must tolerate being called without a session
    fn shutdown(&self);
}

/// Client that prints what would be downloaded
#[derive(Debug, Default)]
pub struct DryRunClient;

impl DryRunClient {
    pub fn new() -> Self {
        Self
    }

    fn print_settings(settings: &DownloadSettings) {
        if let Some(dir) = &settings.install_dir {
            println!("  Install directory: {}", dir.display());
        }
        if let Some(filter) = &settings.file_filter {
            println!(
                "  File list: {} paths, {} patterns",
                filter.exact.len(),
                filter.patterns.len()
            );
        }
        if settings.verify_all {
            println!("  Verifying all existing files");
        }
        if settings.manifest_only {
            println!("  Manifests only");
        }
        println!(
            "  Servers: {}, concurrent downloads: {}, cell id: {}",
            settings.limits.max_servers, settings.limits.max_downloads, settings.cell_id
        );
    }
}

#[async_trait]
impl ContentClient for DryRunClient {
    async fn session_init(&self, login: &SessionLogin) -> bool {
        match (&login.username, login.use_qr) {
            (_, true) => info!("Dry run: QR code login accepted"),
            (Some(username), false) => info!("Dry run: login for {} accepted", username),
            (None, false) => info!("Dry run: anonymous login accepted"),
        }
        true
    }

    async fn download_app(
        &self,
        request: &DownloadRequest,
        versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        println!(
            "Dry run - would download app {} from branch '{}':",
            request.app_id, request.branch
        );

        if request.depots.is_empty() {
            println!("  All depots matching the platform and language filters");
        }
        for depot in &request.depots {
            let manifest = depot
                .manifest_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "latest".to_string());
            match versions.installed_manifest(depot.depot_id) {
                Some(installed) => println!(
                    "  Depot {} manifest {} (installed: {})",
                    depot.depot_id, manifest, installed
                ),
                None => println!("  Depot {} manifest {}", depot.depot_id, manifest),
            }
        }

        if request.platform.all_platforms {
            println!("  Platforms: all");
        } else if let Some(os) = &request.platform.os {
            println!(
                "  Platform: {} {}",
                os,
                request.platform.arch.as_deref().unwrap_or("")
            );
        }
        if request.language.all_languages {
            println!("  Languages: all");
        } else if let Some(language) = &request.language.language {
            println!("  Language: {}", language);
        }
        if request.low_violence {
            println!("  Including low violence depots");
        }
        Self::print_settings(&request.settings);
        Ok(())
    }

    async fn download_pubfile(
        &self,
        app_id: u32,
        published_file_id: u64,
        settings: &DownloadSettings,
        _versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        println!(
            "Dry run - would download published file {} of app {}",
            published_file_id, app_id
        );
        Self::print_settings(settings);
        Ok(())
    }

    async fn download_ugc(
        &self,
        app_id: u32,
        ugc_id: u64,
        settings: &DownloadSettings,
        _versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        println!("Dry run - would download UGC {} of app {}", ugc_id, app_id);
        Self::print_settings(settings);
        Ok(())
    }

    fn shutdown(&self) {
        debug!("Dry run session closed");
    }
}
