// # File Secret Store
//
// File-based implementation of SecretStore.
//
// ## Purpose
//
// Reads secrets from a directory tree, which is how a secret volume is
// projected into a container. No cluster API access is needed: mount the
// secrets and point the store at the mount.
//
// ## Layout
//
// ```text
// <root>/
//   cert-manager/            # namespace
//     do-credentials/        # secret name
//       token                # key; file contents are the value
// ```
//
// Entries whose name starts with `..` (the volume's atomic-update
// bookkeeping), subdirectories and dangling links are ignored.
//
// ## Freshness
//
// Nothing is cached: each `get` reads the directory again, so a rotated
// token is visible to the next challenge.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::traits::secret_store::{Secret, SecretStore};
use crate::Error;

/// File-based secret store
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::secret::FileSecretStore;
/// use dns01_core::traits::SecretStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileSecretStore::open("/var/run/secrets/dns01").await?;
///     let secret = store.get("cert-manager", "do-credentials").await?;
///     println!("keys: {:?}", secret);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    root: PathBuf,
}

impl FileSecretStore {
    /// Open a store rooted at `root`
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: `root` does not exist or is not a directory
    pub async fn open<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();

        let metadata = fs::metadata(&root).await.map_err(|e| {
            Error::config(format!(
                "Secret store root {} is not accessible: {}",
                root.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(Error::config(format!(
                "Secret store root {} is not a directory",
                root.display()
            )));
        }

        tracing::debug!("Opened file secret store at {}", root.display());
        Ok(Self { root })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one secret's keys
    fn secret_dir(&self, namespace: &str, name: &str) -> Result<PathBuf, Error> {
        for component in [namespace, name] {
            if !is_safe_component(component) {
                return Err(Error::not_found(format!(
                    "invalid secret reference {}/{}",
                    namespace, name
                )));
            }
        }
        Ok(self.root.join(namespace).join(name))
    }
}

/// A single, non-empty path segment that cannot escape the root
fn is_safe_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains('/')
        && !component.contains('\\')
        && !component.contains('\0')
}

/// Contents of one key file, or `None` for entries that are not keys
///
/// Follows symlinks, which is how projected keys are laid out. A link that
/// dangles mid-rotation is skipped rather than failing the whole secret.
async fn read_key(path: &Path) -> Result<Option<Vec<u8>>, Error> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Skipping dangling secret entry {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(Error::Io(e)),
    };
    if !metadata.is_file() {
        return Ok(None);
    }

    match fs::read(path).await {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Secret entry {} vanished while reading", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::Io(e)),
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Secret, Error> {
        let dir = self.secret_dir(namespace, name)?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(format!("secret {}/{}", namespace, name)));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut data = BTreeMap::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(key) = file_name.to_str() else {
                continue;
            };
            if key.starts_with("..") {
                continue;
            }

            if let Some(value) = read_key(&entry.path()).await? {
                data.insert(key.to_string(), value);
            }
        }

        tracing::debug!(
            "Read secret {}/{} ({} keys) from {}",
            namespace,
            name,
            data.len(),
            self.root.display()
        );

        Ok(Secret { data })
    }

    fn store_name(&self) -> &'static str {
        "file"
    }
}
