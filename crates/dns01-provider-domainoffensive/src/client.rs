// # Domain Offensive API Client
//
// One call, one record:
//
// ```http
// GET {apiUrl}?domain=_acme-challenge.example.com&token=<token>&value=<txt>
// GET {apiUrl}?action=delete&domain=_acme-challenge.example.com&token=<token>&value=<txt>
// ```
//
// A 200 response carries `{"success": true|false}`; nothing else in the body
// is interpreted. The vendor treats set/unset of the same record as
// idempotent, so repeating a call is safe.
//
// ## Security
//
// The token travels as a query parameter because that is what the endpoint
// accepts. It is never logged, and request URLs are never logged.

use dns01_core::{Error, Result};
use serde::Deserialize;

/// Which side of the challenge a call performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// Create the TXT record
    Present,
    /// Delete the TXT record
    CleanUp,
}

impl RecordAction {
    /// Whether the call sends `action=delete`
    pub fn is_delete(self) -> bool {
        matches!(self, RecordAction::CleanUp)
    }
}

/// Body of a 200 response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
}

/// Strip a single trailing dot from a fully qualified name
pub fn normalize_fqdn(fqdn: &str) -> &str {
    fqdn.strip_suffix('.').unwrap_or(fqdn)
}

/// Query parameters for one call, in the order they are encoded
///
/// Keys are sorted, matching how the endpoint's reference client encodes them.
pub fn query_params<'a>(
    fqdn: &'a str,
    value: &'a str,
    token: &'a str,
    action: RecordAction,
) -> Vec<(&'static str, &'a str)> {
    let mut params = Vec::with_capacity(4);
    if action.is_delete() {
        params.push(("action", "delete"));
    }
    params.push(("domain", normalize_fqdn(fqdn)));
    params.push(("token", token));
    params.push(("value", value));
    params
}

/// HTTP client for the Domain Offensive letsencrypt endpoint
///
/// Stateless apart from the connection pool; one instance is shared by all
/// calls of a solver.
#[derive(Debug, Clone, Default)]
pub struct DomainOffensiveClient {
    client: reqwest::Client,
}

impl DomainOffensiveClient {
    /// Create a client with reqwest's default settings (no timeout override)
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured reqwest client (proxies, custom timeouts)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Create or delete the challenge TXT record
    ///
    /// Exactly one HTTP request is made. No retries.
    ///
    /// # Parameters
    ///
    /// - `api_url`: Endpoint to call
    /// - `fqdn`: Record name, trailing dot optional
    /// - `value`: TXT record value
    /// - `token`: API token
    /// - `action`: Create or delete
    ///
    /// # Returns
    ///
    /// - `Err(Error::Network)`: The request could not be sent or the body not read
    /// - `Err(Error::ApiStatus)`: Status other than 200
    /// - `Err(Error::ApiDecode)`: Body is not `{"success": bool}` JSON
    /// - `Err(Error::ApiFailure)`: `success` is false
    pub async fn call_api(
        &self,
        api_url: &str,
        fqdn: &str,
        value: &str,
        token: &str,
        action: RecordAction,
    ) -> Result<()> {
        let params = query_params(fqdn, value, token, action);

        tracing::debug!(
            "Calling Domain Offensive API: domain={} delete={}",
            normalize_fqdn(fqdn),
            action.is_delete()
        );

        let response = self
            .client
            .get(api_url)
            .query(&params)
            .send()
            .await
            // without_url: the URL carries the token
            .map_err(|e| Error::network(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("error reading response body: {}", e.without_url())))?;

        if status.as_u16() != 200 {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ApiResponse = serde_json::from_str(&body).map_err(|e| Error::ApiDecode {
            message: e.to_string(),
            body: body.clone(),
        })?;

        if !parsed.success {
            return Err(Error::ApiFailure { body });
        }

        match action {
            RecordAction::Present => tracing::info!("Presented acme txt record {}", fqdn),
            RecordAction::CleanUp => tracing::info!("Cleaned up acme txt record {}", fqdn),
        }

        Ok(())
    }
}
