//! Persistent state kept between runs
//!
//! Two independent stores follow the same load-once/save-after-load pattern:
//! remembered login tokens ([`AccountSettings`]) and the last installed
//! manifest of every depot in an install directory ([`DepotConfig`]).

pub mod account;
pub mod depot;
pub mod persistent;

use std::path::Path;

use tracing::debug;

use crate::config::StorageConfig;
use crate::errors::StoreResult;

pub use account::AccountSettings;
pub use depot::DepotConfig;
pub use persistent::{PersistentStore, StoreKind};

/// Both stores, threaded explicitly through a run
#[derive(Debug, Default)]
pub struct Stores {
    pub accounts: PersistentStore<AccountSettings>,
    pub depots: PersistentStore<DepotConfig>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the token store and the version store for `install_dir`
    pub fn load(storage: &StorageConfig, install_dir: Option<&Path>) -> StoreResult<Self> {
        let mut stores = Self::new();
        stores.accounts.load(&storage.account_config)?;
        stores.depots.load(storage.depot_config_path(install_dir))?;
        Ok(stores)
    }

    /// Flush both stores
    pub fn save(&self) -> StoreResult<()> {
        self.accounts.save()?;
        self.depots.save()?;
        debug!("Persistent stores saved");
        Ok(())
    }
}
