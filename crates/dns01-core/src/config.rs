//! Configuration types shared by solvers
//!
//! Provider-specific config (endpoint URLs and the like) lives with the
//! provider; this module only holds what every solver needs to find its
//! credentials.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference to one key inside a named secret
///
/// The solver never owns the secret material, only this lookup key. It is
/// resolved against a [`SecretStore`](crate::SecretStore) on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    /// Secret name within the challenge's namespace
    #[serde(default)]
    pub name: String,

    /// Key inside the secret's data
    #[serde(default)]
    pub key: String,
}

impl SecretKeySelector {
    /// Create a new selector
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for SecretKeySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.key)
    }
}

/// Secret store connection configuration
///
/// Passed to [`Solver::initialize`](crate::Solver::initialize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecretStoreConfig {
    /// Directory tree of `<namespace>/<name>/<key>` files
    File {
        /// Root directory of the tree
        path: PathBuf,
    },

    /// In-memory store, empty on creation
    #[default]
    Memory,
}

impl SecretStoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SecretStoreConfig::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err(crate::Error::config("File secret store path cannot be empty"));
                }
                Ok(())
            }
            SecretStoreConfig::Memory => Ok(()),
        }
    }

    /// Get the store type name
    pub fn type_name(&self) -> &'static str {
        match self {
            SecretStoreConfig::File { .. } => "file",
            SecretStoreConfig::Memory => "memory",
        }
    }
}
