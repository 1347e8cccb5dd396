//! Integration tests for a full launch
//!
//! These tests drive the command line through validation, login, dispatch
//! and store persistence against a recording content client.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use depot_downloader::app::store::{AccountSettings, PersistentStore};
use depot_downloader::app::{ContentClient, DepotConfig, DownloadRequest, DownloadSettings};
use depot_downloader::auth::{PasswordPrompt, SessionLogin};
use depot_downloader::cli::{handle_launch, prepare_launch, LaunchPlan};
use depot_downloader::config::AppConfig;
use depot_downloader::errors::{AppError, DownloadError, DownloadResult};

/// Records logins and installs every requested depot at manifest `depot * 10`
#[derive(Default)]
struct RecordingClient {
    logins: Mutex<Vec<SessionLogin>>,
    shutdowns: AtomicUsize,
    fail_with: Mutex<Option<DownloadError>>,
}

#[async_trait]
impl ContentClient for RecordingClient {
    async fn session_init(&self, login: &SessionLogin) -> bool {
        self.logins.lock().unwrap().push(login.clone());
        true
    }

    async fn download_app(
        &self,
        request: &DownloadRequest,
        versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        if let Some(error) = self.fail_with.lock().unwrap().take() {
            return Err(error);
        }
        for depot in &request.depots {
            let manifest = depot.manifest_id.unwrap_or(u64::from(depot.depot_id) * 10);
            versions.record_install(depot.depot_id, manifest);
        }
        Ok(())
    }

    async fn download_pubfile(
        &self,
        _app_id: u32,
        _published_file_id: u64,
        _settings: &DownloadSettings,
        _versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        Ok(())
    }

    async fn download_ugc(
        &self,
        _app_id: u32,
        _ugc_id: u64,
        _settings: &DownloadSettings,
        _versions: &mut DepotConfig,
    ) -> DownloadResult<()> {
        Ok(())
    }

    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

struct Answers(Vec<&'static str>);

impl PasswordPrompt for Answers {
    fn read_password(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        if self.0.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.0.remove(0).to_string()))
        }
    }
}

/// Write a config file keeping every store inside `dir`
fn write_config(dir: &Path) -> String {
    let config_path = dir.join("depot-downloader.toml");
    let account_path = dir.join("account.config");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\naccount_config = {:?}\n\n[logging]\nlevel = \"info\"\n",
            account_path.to_string_lossy()
        ),
    )
    .unwrap();
    config_path.to_string_lossy().to_string()
}

fn ready(args: &[&str]) -> (depot_downloader::app::Launch, AppConfig) {
    match prepare_launch(args).unwrap() {
        LaunchPlan::Ready { launch, config } => (launch, config),
        LaunchPlan::Exit(code) => panic!("unexpected exit {}", code),
    }
}

fn load_versions(path: &Path) -> DepotConfig {
    let mut store = PersistentStore::<DepotConfig>::new();
    store.load(path).unwrap();
    store.get().unwrap().clone()
}

#[tokio::test]
async fn test_depot_download_persists_versions() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let install_dir = temp_dir.path().join("game");
    let install_arg = install_dir.to_string_lossy().to_string();

    let (launch, config) = ready(&[
        "-app", "10", "-depot", "11", "12", "-manifest", "100", "200", "-dir", &install_arg,
        "-config", &config,
    ]);
    let client = RecordingClient::default();

    let code = handle_launch(&launch, &config, &client, &mut Answers(vec![]))
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(client.shutdowns.load(Ordering::SeqCst), 1);
    assert!(client.logins.lock().unwrap()[0].is_anonymous());

    let versions = load_versions(&install_dir.join(".DepotDownloader").join("depot.config"));
    assert_eq!(versions.installed_manifest_ids.len(), 2);
    assert_eq!(versions.installed_manifest(11), Some(100));
    assert_eq!(versions.installed_manifest(12), Some(200));
    assert!(temp_dir.path().join("account.config").exists());
}

#[tokio::test]
async fn test_remembered_token_used_without_prompt() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let mut accounts = PersistentStore::<AccountSettings>::new();
    accounts.load(temp_dir.path().join("account.config")).unwrap();
    accounts
        .get_mut()
        .unwrap()
        .login_tokens
        .insert("alyx".to_string(), "stored-token".to_string());
    accounts.save().unwrap();

    let install_arg = temp_dir.path().join("game").to_string_lossy().to_string();
    let (launch, config) = ready(&[
        "-app", "10", "-username", "alyx", "-remember-password", "-dir", &install_arg,
        "-config", &config,
    ]);
    let client = RecordingClient::default();

    let code = handle_launch(&launch, &config, &client, &mut Answers(vec![]))
        .await
        .unwrap();

    assert_eq!(code, 0);
    let logins = client.logins.lock().unwrap();
    assert_eq!(logins[0].username.as_deref(), Some("alyx"));
    assert_eq!(logins[0].login_token.as_deref(), Some("stored-token"));
    assert_eq!(logins[0].password, None);
}

#[tokio::test]
async fn test_prompted_password_reaches_session() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let install_arg = temp_dir.path().join("game").to_string_lossy().to_string();

    let (launch, config) = ready(&[
        "-app", "10", "-user", "eli", "-dir", &install_arg, "-config", &config,
    ]);
    let client = RecordingClient::default();

    let code = handle_launch(&launch, &config, &client, &mut Answers(vec!["", "resonance"]))
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        client.logins.lock().unwrap()[0].password.as_deref(),
        Some("resonance")
    );
}

#[tokio::test]
async fn test_declared_failure_exits_one_and_saves() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let install_dir = temp_dir.path().join("game");
    let install_arg = install_dir.to_string_lossy().to_string();

    let (launch, config) = ready(&["-app", "10", "-dir", &install_arg, "-config", &config]);
    let client = RecordingClient::default();
    *client.fail_with.lock().unwrap() = Some(DownloadError::content("App 10 is not available"));

    let code = handle_launch(&launch, &config, &client, &mut Answers(vec![]))
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert_eq!(client.shutdowns.load(Ordering::SeqCst), 1);
    assert!(install_dir.join(".DepotDownloader/depot.config").exists());
}

#[tokio::test]
async fn test_unexpected_failure_skips_save() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let install_dir = temp_dir.path().join("game");
    let install_arg = install_dir.to_string_lossy().to_string();

    let (launch, config) = ready(&["-app", "10", "-dir", &install_arg, "-config", &config]);
    let client = RecordingClient::default();
    *client.fail_with.lock().unwrap() =
        Some(DownloadError::Unexpected(anyhow::anyhow!("chunk decryption failed")));

    let result = handle_launch(&launch, &config, &client, &mut Answers(vec![])).await;

    assert!(matches!(result, Err(AppError::Download(DownloadError::Unexpected(_)))));
    assert_eq!(client.shutdowns.load(Ordering::SeqCst), 1);
    assert!(!install_dir.join(".DepotDownloader/depot.config").exists());
}
