//! Remembered login tokens

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::persistent::StoreKind;

/// Per-account login state kept between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Username to refresh token
    #[serde(default)]
    pub login_tokens: HashMap<String, String>,
    /// Username to guard data
    #[serde(default)]
    pub guard_data: HashMap<String, String>,
}

impl AccountSettings {
    /// Stored refresh token for `username`, if any
    pub fn login_token(&self, username: &str) -> Option<&str> {
        self.login_tokens.get(username).map(String::as_str)
    }

    pub fn has_login_token(&self, username: &str) -> bool {
        self.login_tokens.contains_key(username)
    }
}

impl StoreKind for AccountSettings {
    const KIND: &'static str = "account";
}
