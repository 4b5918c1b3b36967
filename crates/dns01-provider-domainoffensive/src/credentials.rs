//! API token resolution
//!
//! The token is looked up fresh on every call: the solver keeps a handle to
//! the secret store, never the token itself.

use dns01_core::{Error, Result, SecretKeySelector, SecretStore};

/// Resolve the API token referenced by `selector` within `namespace`
///
/// # Returns
///
/// - `Ok(String)`: The token text
/// - `Err(Error::MissingCredentialKey)`: `selector.key` is empty (nothing is looked up)
/// - `Err(Error::SecretLookup)`: `selector.name` is empty or the store lookup failed
/// - `Err(Error::SecretKeyNotFound)`: The secret has no entry for `selector.key`
/// - `Err(Error::InvalidSecretValue)`: The entry is not UTF-8
pub async fn resolve_token(
    store: &dyn SecretStore,
    namespace: &str,
    selector: &SecretKeySelector,
) -> Result<String> {
    if selector.key.is_empty() {
        return Err(Error::MissingCredentialKey);
    }

    if selector.name.is_empty() {
        return Err(Error::secret_lookup(
            namespace,
            &selector.name,
            "not found: secretKeyRef.name is empty",
        ));
    }

    let secret = store
        .get(namespace, &selector.name)
        .await
        .map_err(|e| Error::secret_lookup(namespace, &selector.name, e))?;

    secret
        .string_value(&selector.key)?
        .ok_or_else(|| Error::SecretKeyNotFound {
            key: selector.key.clone(),
            namespace: namespace.to_string(),
            name: selector.name.clone(),
        })
}
