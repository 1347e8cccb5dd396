//! Last installed manifest per depot

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::persistent::StoreKind;

/// Installed content versions for one install directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotConfig {
    /// Depot id to the manifest id last installed successfully
    #[serde(default)]
    pub installed_manifest_ids: HashMap<u32, u64>,
}

impl DepotConfig {
    pub fn installed_manifest(&self, depot_id: u32) -> Option<u64> {
        self.installed_manifest_ids.get(&depot_id).copied()
    }

    /// Record a completed depot install, returning the previous manifest
    pub fn record_install(&mut self, depot_id: u32, manifest_id: u64) -> Option<u64> {
        self.installed_manifest_ids.insert(depot_id, manifest_id)
    }
}

impl StoreKind for DepotConfig {
    const KIND: &'static str = "depot";
}
