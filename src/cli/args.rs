//! Command-line argument parsing for Depot Downloader
//!
//! Flags are spelled with a single dash and matched case-insensitively
//! (`-app 730 -DEPOT 731 732`). Known flag tokens are rewritten to their
//! canonical `--long` form before clap sees them, so both spellings work.
//! [`Cli::into_launch`] then validates the combination and builds the
//! immutable request for exactly one download mode.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, warn};

use crate::app::filelist::FileFilter;
use crate::app::models::{
    ConcurrencyLimits, CredentialInput, DepotManifest, DownloadRequest, DownloadSettings,
    LanguageFilter, Launch, LaunchRequest, PlatformFilter, WorkshopItem, WorkshopItemRequest,
};
use crate::config::DownloadDefaults;
use crate::constants::download;
use crate::errors::{ConfigError, ConfigResult};

/// Flag names accepted with a single dash, in canonical lower case
const KNOWN_FLAGS: &[&str] = &[
    "app",
    "depot",
    "manifest",
    "pubfile",
    "ugc",
    "branch",
    "beta",
    "betapassword",
    "all-platforms",
    "os",
    "osarch",
    "all-languages",
    "language",
    "lowviolence",
    "username",
    "user",
    "password",
    "pass",
    "remember-password",
    "qr",
    "dir",
    "filelist",
    "verify-all",
    "verify_all",
    "validate",
    "manifest-only",
    "cellid",
    "max-servers",
    "max-downloads",
    "loginid",
    "debug",
    "config",
    "help",
];

/// Flags that take exactly one value token
const SINGLE_VALUE_FLAGS: &[&str] = &[
    "app",
    "pubfile",
    "ugc",
    "branch",
    "beta",
    "betapassword",
    "os",
    "osarch",
    "language",
    "username",
    "user",
    "password",
    "pass",
    "dir",
    "filelist",
    "cellid",
    "max-servers",
    "max-downloads",
    "loginid",
    "config",
];

/// Depot Downloader - download application depots and workshop items
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "depot_downloader",
    disable_version_flag = true,
    about = "Download application depots and workshop items from a content distribution service",
    override_usage = "depot_downloader -app <id> [-depot <id> [-manifest <id>]] [-username <username> [-password <password>]] [other options]
       depot_downloader -app <id> -pubfile <id> [-username <username> [-password <password>]]
       depot_downloader -app <id> -ugc <id> [-username <username> [-password <password>]]",
    after_help = "Flags may be written with a single dash (-app) and in any case."
)]
pub struct Cli {
    /// The AppID to download
    #[arg(long, value_name = "ID")]
    pub app: Option<u32>,

    /// The DepotID(s) to download
    #[arg(long, value_name = "ID", num_args = 0..)]
    pub depot: Vec<u32>,

    /// Manifest id(s) of the content to download, one per -depot (default: current for branch)
    #[arg(long, value_name = "ID", num_args = 0..)]
    pub manifest: Vec<u64>,

    /// The PublishedFileId to download (resolved to a UGC id)
    #[arg(long, value_name = "ID")]
    pub pubfile: Option<u64>,

    /// The UGC id to download
    #[arg(long, value_name = "ID")]
    pub ugc: Option<u64>,

    /// Download from the specified branch if available (default: public)
    #[arg(long, alias = "beta", value_name = "NAME", allow_hyphen_values = true)]
    pub branch: Option<String>,

    /// Branch password if applicable
    #[arg(long, value_name = "PASSWORD", allow_hyphen_values = true)]
    pub betapassword: Option<String>,

    /// Download all platform-specific depots when -app is used
    #[arg(long)]
    pub all_platforms: bool,

    /// The operating system to download the game for (windows, macos or linux; default: host OS)
    #[arg(long, value_name = "OS", allow_hyphen_values = true)]
    pub os: Option<String>,

    /// The architecture to download the game for (32 or 64; default: host architecture)
    #[arg(long, value_name = "ARCH", allow_hyphen_values = true)]
    pub osarch: Option<String>,

    /// Download all language-specific depots when -app is used
    #[arg(long)]
    pub all_languages: bool,

    /// The language to download the game for (default: english)
    #[arg(long, value_name = "LANGUAGE", allow_hyphen_values = true)]
    pub language: Option<String>,

    /// Download low violence depots when -app is used
    #[arg(long)]
    pub lowviolence: bool,

    /// The username of the account to log in with for restricted content
    #[arg(long, alias = "user", value_name = "USER", allow_hyphen_values = true)]
    pub username: Option<String>,

    /// The password of the account to log in with for restricted content
    #[arg(long, alias = "pass", value_name = "PASSWORD", allow_hyphen_values = true)]
    pub password: Option<String>,

    /// Remember the login for subsequent runs (use -username <user> -remember-password)
    #[arg(long)]
    pub remember_password: bool,

    /// Log in with a QR code shown in the terminal
    #[arg(long)]
    pub qr: bool,

    /// The directory in which to place downloaded files
    #[arg(long, value_name = "DIR", allow_hyphen_values = true)]
    pub dir: Option<PathBuf>,

    /// File with the list of files to download; prefix a line with `regex:` to match a pattern
    #[arg(long, value_name = "FILE", allow_hyphen_values = true)]
    pub filelist: Option<PathBuf>,

    /// Verify checksums of already downloaded files
    #[arg(long = "verify-all", aliases = ["verify_all", "validate"])]
    pub verify_all: bool,

    /// Download a human readable manifest for any depots that would be downloaded
    #[arg(long)]
    pub manifest_only: bool,

    /// The overridden CellID of the content server to download from
    #[arg(long, value_name = "ID", allow_negative_numbers = true)]
    pub cellid: Option<i64>,

    /// Maximum number of content servers to use (default: 20)
    #[arg(long, value_name = "N")]
    pub max_servers: Option<u32>,

    /// Maximum number of chunks to download concurrently (default: 8)
    #[arg(long, value_name = "N")]
    pub max_downloads: Option<u32>,

    /// A unique 32-bit logon id, required when running multiple instances at once
    #[arg(long, value_name = "ID")]
    pub loginid: Option<u32>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE", allow_hyphen_values = true)]
    pub config: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Cli {
    /// Parse an argument vector (without the program name)
    pub fn try_parse_legacy<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv = std::iter::once("depot_downloader".to_string())
            .chain(normalize_legacy_flags(args));
        Self::try_parse_from(argv)
    }

    /// Validate the parsed flags and build the launch request
    pub fn into_launch(self, defaults: &DownloadDefaults) -> ConfigResult<Launch> {
        let app_id = self
            .app
            .ok_or(ConfigError::MissingArgument { flag: "-app" })?;

        if self.pubfile.is_some() && self.ugc.is_some() {
            return Err(ConfigError::Conflict {
                first: "-pubfile",
                second: "-ugc",
            });
        }
        let os = non_empty(self.os);
        if self.all_platforms && os.is_some() {
            return Err(ConfigError::Conflict {
                first: "-os",
                second: "-all-platforms",
            });
        }
        let language = non_empty(self.language);
        if self.all_languages && language.is_some() {
            return Err(ConfigError::Conflict {
                first: "-language",
                second: "-all-languages",
            });
        }

        let depots = pair_depot_manifests(&self.depot, &self.manifest)?;
        let cell_id = resolve_cell_id(self.cellid)?;
        let limits = ConcurrencyLimits::normalized(
            self.max_servers.unwrap_or(defaults.max_servers),
            self.max_downloads.unwrap_or(defaults.max_downloads),
        );

        let settings = DownloadSettings {
            install_dir: self.dir,
            file_filter: self.filelist.as_deref().and_then(load_file_list),
            verify_all: self.verify_all,
            manifest_only: self.manifest_only,
            cell_id,
            limits,
            login_id: self.loginid,
        };

        let workshop_item = self
            .pubfile
            .map(WorkshopItem::PublishedFile)
            .or(self.ugc.map(WorkshopItem::Ugc));

        let request = match workshop_item {
            Some(item) => LaunchRequest::Workshop(WorkshopItemRequest {
                app_id,
                item,
                settings,
            }),
            None => LaunchRequest::Depot(DownloadRequest {
                app_id,
                depots,
                branch: self
                    .branch
                    .unwrap_or_else(|| download::DEFAULT_BRANCH.to_string()),
                branch_password: self.betapassword,
                platform: PlatformFilter {
                    os,
                    arch: self.osarch,
                    all_platforms: self.all_platforms,
                },
                language: LanguageFilter {
                    language,
                    all_languages: self.all_languages,
                },
                low_violence: self.lowviolence,
                settings,
            }),
        };
        debug!("Validated {} request for app {}", request.mode(), app_id);

        Ok(Launch {
            request,
            credentials: CredentialInput {
                username: self.username,
                password: self.password,
                remember_password: self.remember_password,
                use_qr: self.qr,
            },
            debug: self.debug,
        })
    }
}

/// Rewrite known single-dash or mixed-case flags to `--lowercase`
///
/// The token after a single-value flag is its value and is passed through
/// untouched, even when it looks like a flag (`-password -Debug`).
pub fn normalize_legacy_flags<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = Vec::new();
    let mut value_pending = false;

    for arg in args {
        let arg = arg.as_ref();
        if value_pending {
            value_pending = false;
            normalized.push(arg.to_string());
            continue;
        }

        match canonical_flag(arg) {
            Some(flag) => {
                value_pending = SINGLE_VALUE_FLAGS.contains(&&flag[2..]);
                normalized.push(flag);
            }
            None => normalized.push(arg.to_string()),
        }
    }

    normalized
}

fn canonical_flag(token: &str) -> Option<String> {
    let name = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    let name = name.to_ascii_lowercase();
    KNOWN_FLAGS
        .contains(&name.as_str())
        .then(|| format!("--{}", name))
}

/// Pair manifests with depots by position
fn pair_depot_manifests(depots: &[u32], manifests: &[u64]) -> ConfigResult<Vec<DepotManifest>> {
    if manifests.is_empty() {
        return Ok(depots.iter().copied().map(DepotManifest::latest).collect());
    }

    if depots.len() != manifests.len() {
        return Err(ConfigError::ManifestCountMismatch {
            depots: depots.len(),
            manifests: manifests.len(),
        });
    }

    Ok(depots
        .iter()
        .zip(manifests)
        .map(|(&depot_id, &manifest_id)| DepotManifest::pinned(depot_id, manifest_id))
        .collect())
}

fn resolve_cell_id(cell_id: Option<i64>) -> ConfigResult<u32> {
    match cell_id {
        None | Some(download::UNSET_CELL_ID) => Ok(0),
        Some(id) => u32::try_from(id).map_err(|_| ConfigError::InvalidValue {
            flag: "-cellid",
            value: id.to_string(),
            reason: "Cell id must be between 0 and 4294967295".to_string(),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn load_file_list(path: &Path) -> Option<FileFilter> {
    match FileFilter::from_file(path) {
        Ok(filter) => {
            println!("Using file list: '{}'.", path.display());
            Some(filter)
        }
        Err(e) => {
            warn!("Ignoring file list {}: {}", path.display(), e);
            println!("Warning: Unable to load file list: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn launch(args: &[&str]) -> ConfigResult<Launch> {
        Cli::try_parse_legacy(args)?.into_launch(&DownloadDefaults::default())
    }

    fn depot_request(args: &[&str]) -> DownloadRequest {
        match launch(args).unwrap().request {
            LaunchRequest::Depot(request) => request,
            other => panic!("expected depot request, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_legacy_flags() {
        let args = normalize_legacy_flags([
            "-app", "730", "-DEPOT", "1", "--Manifest", "2", "-V", "-verify_all", "-1",
        ]);

        assert_eq!(
            args,
            vec!["--app", "730", "--depot", "1", "--manifest", "2", "-V", "--verify_all", "-1"]
        );
    }

    #[test]
    fn test_values_after_flags_kept_verbatim() {
        let args = normalize_legacy_flags([
            "-password", "-Debug", "-betapassword", "-APP", "-depot", "-qr",
        ]);

        assert_eq!(
            args,
            vec!["--password", "-Debug", "--betapassword", "-APP", "--depot", "--qr"]
        );
    }

    #[test]
    fn test_dash_prefixed_password() {
        let dashed = launch(&["-app", "1", "-username", "u", "-password", "-secret"]).unwrap();
        assert_eq!(dashed.credentials.password.as_deref(), Some("-secret"));

        let flag_like = launch(&["-app", "1", "-username", "u", "-password", "-Debug"]).unwrap();
        assert_eq!(flag_like.credentials.password.as_deref(), Some("-Debug"));
        assert!(!flag_like.debug);
    }

    #[test]
    fn test_flag_like_branch_password() {
        let request = depot_request(&[
            "-app", "730", "-beta", "-staging", "-betapassword", "-qr", "-dir", "-out",
        ]);

        assert_eq!(request.branch, "-staging");
        assert_eq!(request.branch_password.as_deref(), Some("-qr"));
        assert_eq!(
            request.settings.install_dir.as_deref(),
            Some(Path::new("-out"))
        );
    }

    #[test]
    fn test_depot_lists_pair_positionally() {
        let request = depot_request(&[
            "-app", "730", "-depot", "731", "732", "-manifest", "100", "200",
        ]);

        assert_eq!(
            request.depots,
            vec![DepotManifest::pinned(731, 100), DepotManifest::pinned(732, 200)]
        );
        assert_eq!(request.branch, "public");
    }

    #[test]
    fn test_depots_without_manifests() {
        let request = depot_request(&["-app", "730", "-depot", "731", "732", "-lowviolence"]);

        assert_eq!(
            request.depots,
            vec![DepotManifest::latest(731), DepotManifest::latest(732)]
        );
        assert!(request.low_violence);
    }

    #[test]
    fn test_empty_depot_list() {
        let request = depot_request(&["-app", "730", "-depot", "-all-languages"]);

        assert!(request.depots.is_empty());
        assert!(request.language.all_languages);
    }

    #[test]
    fn test_manifest_count_mismatch() {
        for args in [
            &["-app", "1", "-depot", "2", "3", "-manifest", "4"][..],
            &["-app", "1", "-depot", "2", "-manifest", "4", "5"][..],
            &["-app", "1", "-manifest", "4"][..],
        ] {
            assert!(matches!(
                launch(args),
                Err(ConfigError::ManifestCountMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_mutually_exclusive_flags() {
        assert!(matches!(
            launch(&["-app", "1", "-pubfile", "2", "-ugc", "3"]),
            Err(ConfigError::Conflict { first: "-pubfile", .. })
        ));
        assert!(matches!(
            launch(&["-app", "1", "-os", "linux", "-all-platforms"]),
            Err(ConfigError::Conflict { first: "-os", .. })
        ));
        assert!(matches!(
            launch(&["-app", "1", "-language", "german", "-all-languages"]),
            Err(ConfigError::Conflict { first: "-language", .. })
        ));
    }

    #[test]
    fn test_app_required() {
        assert!(matches!(
            launch(&["-depot", "1"]),
            Err(ConfigError::MissingArgument { flag: "-app" })
        ));
    }

    #[test]
    fn test_invalid_number_rejected() {
        assert!(matches!(
            launch(&["-app", "abc"]),
            Err(ConfigError::InvalidArguments(_))
        ));
        assert!(matches!(
            launch(&["-app", "1", "-depot", "2", "x"]),
            Err(ConfigError::InvalidArguments(_))
        ));
        assert!(matches!(
            launch(&["-app", "1", "-bogus"]),
            Err(ConfigError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_workshop_modes() {
        let pubfile = launch(&["-app", "440", "-pubfile", "123"]).unwrap();
        assert!(matches!(
            pubfile.request,
            LaunchRequest::Workshop(WorkshopItemRequest {
                app_id: 440,
                item: WorkshopItem::PublishedFile(123),
                ..
            })
        ));

        let ugc = launch(&["-app", "440", "-ugc", "77", "-dir", "out"]).unwrap();
        assert!(matches!(
            &ugc.request,
            LaunchRequest::Workshop(WorkshopItemRequest {
                item: WorkshopItem::Ugc(77),
                ..
            })
        ));
        assert_eq!(ugc.request.install_dir(), Some(Path::new("out")));
    }

    #[test]
    fn test_concurrency_bounds() {
        let raised = depot_request(&["-app", "1", "-max-servers", "5", "-max-downloads", "8"]);
        assert_eq!(raised.settings.limits.max_servers, 8);
        assert_eq!(raised.settings.limits.max_downloads, 8);

        let kept = depot_request(&["-app", "1"]);
        assert_eq!(kept.settings.limits.max_servers, 20);
        assert_eq!(kept.settings.limits.max_downloads, 8);

        let from_downloads = depot_request(&["-app", "1", "-max-downloads", "32"]);
        assert_eq!(from_downloads.settings.limits.max_servers, 32);
    }

    #[test]
    fn test_config_defaults_apply() {
        let defaults = DownloadDefaults {
            max_servers: 4,
            max_downloads: 2,
        };
        let launch = Cli::try_parse_legacy(["-app", "1", "-max-downloads", "6"])
            .unwrap()
            .into_launch(&defaults)
            .unwrap();

        assert_eq!(launch.request.settings().limits.max_servers, 6);
        assert_eq!(launch.request.settings().limits.max_downloads, 6);
    }

    #[test]
    fn test_cell_id() {
        assert_eq!(depot_request(&["-app", "1"]).settings.cell_id, 0);
        assert_eq!(depot_request(&["-app", "1", "-cellid", "-1"]).settings.cell_id, 0);
        assert_eq!(depot_request(&["-app", "1", "-cellid", "52"]).settings.cell_id, 52);
        assert!(matches!(
            launch(&["-app", "1", "-cellid", "-7"]),
            Err(ConfigError::InvalidValue { flag: "-cellid", .. })
        ));
    }

    #[test]
    fn test_aliases_and_credentials() {
        let launch = launch(&[
            "-app",
            "1",
            "-user",
            "gordon",
            "-pass",
            "crowbar",
            "-remember-password",
            "-beta",
            "preview",
            "-betapassword",
            "letmein",
            "-validate",
            "-loginid",
            "12345",
        ])
        .unwrap();

        assert_eq!(launch.credentials.username.as_deref(), Some("gordon"));
        assert_eq!(launch.credentials.password.as_deref(), Some("crowbar"));
        assert!(launch.credentials.remember_password);
        assert!(!launch.credentials.use_qr);

        let LaunchRequest::Depot(request) = launch.request else {
            panic!("expected depot request");
        };
        assert_eq!(request.branch, "preview");
        assert_eq!(request.branch_password.as_deref(), Some("letmein"));
        assert!(request.settings.verify_all);
        assert_eq!(request.settings.login_id, Some(12345));
    }

    #[test]
    fn test_platform_filters() {
        let request = depot_request(&["-app", "1", "-os", "linux", "-osarch", "64", "-language", "french"]);

        assert_eq!(request.platform.os.as_deref(), Some("linux"));
        assert_eq!(request.platform.arch.as_deref(), Some("64"));
        assert_eq!(request.language.language.as_deref(), Some("french"));
        assert!(!request.platform.all_platforms);
    }

    #[test]
    fn test_file_list_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("files.txt");
        std::fs::write(&list, "regex:^data/.*\\.pak$\nreadme.txt\n\n  \n").unwrap();

        let list_arg = list.to_string_lossy().to_string();
        let request = depot_request(&["-app", "1", "-filelist", &list_arg]);
        let filter = request.settings.file_filter.unwrap();

        assert!(filter.exact.contains("readme.txt"));
        assert!(filter.matches("data/x.pak"));
    }

    #[test]
    fn test_unreadable_file_list_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let missing_arg = missing.to_string_lossy().to_string();
        let request = depot_request(&["-app", "1", "-filelist", &missing_arg]);

        assert!(request.settings.file_filter.is_none());
    }
}
