//! Data models for Depot Downloader
//!
//! This module defines the validated request objects produced from the
//! command line. They are built once at startup and never mutated.

use std::path::{Path, PathBuf};

use crate::app::filelist::FileFilter;
use crate::constants::download;

/// A depot to download, optionally pinned to a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepotManifest {
    /// Depot id
    pub depot_id: u32,
    /// Manifest id, `None` meaning "current manifest of the branch"
    pub manifest_id: Option<u64>,
}

impl DepotManifest {
    /// Depot with no specific manifest
    pub fn latest(depot_id: u32) -> Self {
        Self {
            depot_id,
            manifest_id: None,
        }
    }

    /// Depot pinned to a manifest
    pub fn pinned(depot_id: u32, manifest_id: u64) -> Self {
        Self {
            depot_id,
            manifest_id: Some(manifest_id),
        }
    }
}

/// Operating system and architecture selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFilter {
    /// Target OS (windows, macos, linux); `None` means the host OS
    pub os: Option<String>,
    /// Target architecture (32 or 64); `None` means the host architecture
    pub arch: Option<String>,
    /// Download depots for every platform
    pub all_platforms: bool,
}

/// Language selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter {
    /// Target language; `None` means english
    pub language: Option<String>,
    /// Download depots for every language
    pub all_languages: bool,
}

/// Connection and chunk concurrency bounds handed to the collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimits {
    pub max_servers: u32,
    pub max_downloads: u32,
}

impl ConcurrencyLimits {
    /// Build limits, raising `max_servers` so it is never below `max_downloads`
    pub fn normalized(max_servers: u32, max_downloads: u32) -> Self {
        Self {
            max_servers: max_servers.max(max_downloads),
            max_downloads,
        }
    }
}

impl Default for ConcurrencyLimits {
    fn default() -> Self {
        Self::normalized(download::DEFAULT_MAX_SERVERS, download::DEFAULT_MAX_DOWNLOADS)
    }
}

/// Settings shared by every download mode
#[derive(Debug, Clone, Default)]
pub struct DownloadSettings {
    /// Directory to place downloaded files in
    pub install_dir: Option<PathBuf>,
    /// Restricts which files are downloaded
    pub file_filter: Option<FileFilter>,
    /// Verify checksums of every already-downloaded file
    pub verify_all: bool,
    /// Only write human-readable manifests
    pub manifest_only: bool,
    /// Content server region override (0 = automatic)
    pub cell_id: u32,
    /// Concurrency bounds
    pub limits: ConcurrencyLimits,
    /// Unique logon id for running several instances at once
    pub login_id: Option<u32>,
}

/// An application download, optionally restricted to specific depots
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub app_id: u32,
    /// Depots in command-line order; empty means every depot of the app
    pub depots: Vec<DepotManifest>,
    pub branch: String,
    pub branch_password: Option<String>,
    pub platform: PlatformFilter,
    pub language: LanguageFilter,
    pub low_violence: bool,
    pub settings: DownloadSettings,
}

impl DownloadRequest {
    /// Request for every depot of `app_id` on the default branch
    pub fn new(app_id: u32) -> Self {
        Self {
            app_id,
            depots: Vec::new(),
            branch: download::DEFAULT_BRANCH.to_string(),
            branch_password: None,
            platform: PlatformFilter::default(),
            language: LanguageFilter::default(),
            low_violence: false,
            settings: DownloadSettings::default(),
        }
    }
}

/// The two identifier schemes addressing a workshop item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopItem {
    /// Published file id, resolved to a UGC id by the collaborator
    PublishedFile(u64),
    /// Raw UGC id
    Ugc(u64),
}

/// A single workshop item download
#[derive(Debug, Clone)]
pub struct WorkshopItemRequest {
    pub app_id: u32,
    pub item: WorkshopItem,
    pub settings: DownloadSettings,
}

/// Exactly one download mode per invocation
#[derive(Debug, Clone)]
pub enum LaunchRequest {
    Depot(DownloadRequest),
    Workshop(WorkshopItemRequest),
}

impl LaunchRequest {
    pub fn app_id(&self) -> u32 {
        match self {
            LaunchRequest::Depot(request) => request.app_id,
            LaunchRequest::Workshop(request) => request.app_id,
        }
    }

    pub fn settings(&self) -> &DownloadSettings {
        match self {
            LaunchRequest::Depot(request) => &request.settings,
            LaunchRequest::Workshop(request) => &request.settings,
        }
    }

    pub fn install_dir(&self) -> Option<&Path> {
        self.settings().install_dir.as_deref()
    }

    /// Short mode name for logging
    pub fn mode(&self) -> &'static str {
        match self {
            LaunchRequest::Depot(_) => "depot",
            LaunchRequest::Workshop(WorkshopItemRequest {
                item: WorkshopItem::PublishedFile(_),
                ..
            }) => "pubfile",
            LaunchRequest::Workshop(WorkshopItemRequest {
                item: WorkshopItem::Ugc(_),
                ..
            }) => "ugc",
        }
    }
}

/// Login details as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub remember_password: bool,
    pub use_qr: bool,
}

/// Everything a launch needs after argument validation
#[derive(Debug, Clone)]
pub struct Launch {
    pub request: LaunchRequest,
    pub credentials: CredentialInput,
    /// Debug logging requested
    pub debug: bool,
}
