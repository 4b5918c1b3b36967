// # Memory Secret Store
//
// In-memory implementation of SecretStore.
//
// ## Purpose
//
// Provides a simple store that lives as long as the process. Useful for
// tests and for embedding a solver in a program that already holds its
// credentials.
//
// ## Layout
//
// Secrets are keyed by `(namespace, name)`; the same name in two
// namespaces refers to two different secrets.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::traits::secret_store::{Secret, SecretStore};
use crate::Error;

/// In-memory secret store implementation
///
/// This implementation stores all secrets in a HashMap protected by a RwLock.
/// Cloning the store yields another handle to the same secrets.
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::secret::{MemorySecretStore, Secret};
/// use dns01_core::traits::SecretStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemorySecretStore::new();
///
///     store
///         .insert("cert-manager", "do-credentials", Secret::new().with_entry("token", "abc"))
///         .await;
///
///     let secret = store.get("cert-manager", "do-credentials").await?;
///     assert_eq!(secret.string_value("token")?, Some("abc".to_string()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    inner: Arc<RwLock<HashMap<(String, String), Secret>>>,
}

impl MemorySecretStore {
    /// Create a new empty memory secret store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a secret
    pub async fn insert(&self, namespace: impl Into<String>, name: impl Into<String>, secret: Secret) {
        let mut guard = self.inner.write().await;
        guard.insert((namespace.into(), name.into()), secret);
    }

    /// Remove a secret, returning it if it existed
    pub async fn remove(&self, namespace: &str, name: &str) -> Option<Secret> {
        let mut guard = self.inner.write().await;
        guard.remove(&(namespace.to_string(), name.to_string()))
    }

    /// Get the number of secrets in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Secret, Error> {
        let guard = self.inner.read().await;
        guard
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("secret {}/{}", namespace, name)))
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
