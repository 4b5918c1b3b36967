// # Secret Store Implementations
//
// This module provides implementations of the SecretStore trait for
// different credential sources, and the `connect` entry point solvers use
// during `initialize`.

pub mod file;
pub mod memory;

pub use crate::traits::secret_store::Secret;
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;

use std::sync::Arc;

use crate::config::SecretStoreConfig;
use crate::traits::SecretStore;
use crate::Error;

/// Build a secret store handle from its connection configuration
///
/// The handle is shared read-only by every call of the solver that owns it.
///
/// # Returns
///
/// - `Ok(Arc<dyn SecretStore>)`: A connected store
/// - `Err(Error::Config)`: The configuration is invalid or the backend is unreachable
pub async fn connect(config: &SecretStoreConfig) -> Result<Arc<dyn SecretStore>, Error> {
    config.validate()?;

    let store: Arc<dyn SecretStore> = match config {
        SecretStoreConfig::File { path } => Arc::new(FileSecretStore::open(path).await?),
        SecretStoreConfig::Memory => Arc::new(MemorySecretStore::new()),
    };

    tracing::debug!("Connected {} secret store", store.store_name());
    Ok(store)
}
