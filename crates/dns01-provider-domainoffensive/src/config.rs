//! Solver configuration embedded in each challenge request
//!
//! ```json
//! {
//!   "apiUrl": "https://my.do.de/api/letsencrypt",
//!   "secretKeyRef": { "name": "do-credentials", "key": "token" }
//! }
//! ```

use dns01_core::{Error, Result, SecretKeySelector};
use serde::{Deserialize, Serialize};

/// Domain Offensive letsencrypt endpoint
pub const DEFAULT_API_URL: &str = "https://my.do.de/api/letsencrypt";

/// Typed solver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Endpoint to call; empty means [`DEFAULT_API_URL`]
    #[serde(default)]
    pub api_url: String,

    /// Where the API token lives
    #[serde(default)]
    pub secret_key_ref: SecretKeySelector,
}

/// Decode the config blob of a challenge request
///
/// An absent (or `null`) blob yields the default config. The endpoint is
/// defaulted when unset. The credential reference is not checked here.
///
/// # Returns
///
/// - `Err(Error::ConfigDecode)`: The blob does not match the schema
pub fn load_config(raw: Option<&serde_json::Value>) -> Result<SolverConfig> {
    let mut config = match raw {
        None | Some(serde_json::Value::Null) => SolverConfig::default(),
        Some(value) => SolverConfig::deserialize(value)
            .map_err(|e| Error::config_decode(e.to_string()))?,
    };

    if config.api_url.is_empty() {
        config.api_url = DEFAULT_API_URL.to_string();
    }

    tracing::info!(
        api_url = %config.api_url,
        secret_key_ref = %config.secret_key_ref,
        "Solver configuration loaded"
    );

    Ok(config)
}
