//! Error types for DNS01 solvers
//!
//! Every failure a solver can hit is a variant here. Variants carry the
//! context an operator needs (namespace, secret name, HTTP status, raw body)
//! so the host can surface them verbatim.

use thiserror::Error;

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DNS01 solvers
#[derive(Error, Debug)]
pub enum Error {
    /// The solver config blob embedded in the challenge could not be decoded
    #[error("error decoding solver config: {0}")]
    ConfigDecode(String),

    /// The config does not name the key holding the API token
    #[error("missing secretKeyRef.key in solver config")]
    MissingCredentialKey,

    /// The secret could not be fetched from the secret store
    #[error("unable to get secret `{namespace}/{name}`; {message}")]
    SecretLookup {
        /// Namespace the lookup was scoped to
        namespace: String,
        /// Secret name
        name: String,
        /// Underlying cause
        message: String,
    },

    /// The secret exists but has no entry for the requested key
    #[error("key {key:?} not found in secret data of `{namespace}/{name}`")]
    SecretKeyNotFound {
        /// Requested key
        key: String,
        /// Namespace of the secret
        namespace: String,
        /// Secret name
        name: String,
    },

    /// The secret value is not valid UTF-8 text
    #[error("value at key {key:?} is not valid UTF-8")]
    InvalidSecretValue {
        /// Requested key
        key: String,
    },

    /// Transport failure talking to the vendor API
    #[error("http get: {0}")]
    Network(String),

    /// Vendor API answered with a status other than 200
    #[error("api status {status}: {body}")]
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Vendor API answered 200 with a body that is not the expected JSON
    #[error("error decoding api response: {message} (body={body})")]
    ApiDecode {
        /// Parser error
        message: String,
        /// Raw response body
        body: String,
    },

    /// Vendor API answered `{"success": false}`
    #[error("api returned success=false: {body}")]
    ApiFailure {
        /// Raw response body
        body: String,
    },

    /// A lookup in a secret store found nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// `present`/`cleanup` was called before `initialize`
    #[error("solver {0} is not initialized")]
    NotInitialized(String),

    /// Process or store configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors from secret store backends
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config decode error
    pub fn config_decode(msg: impl Into<String>) -> Self {
        Self::ConfigDecode(msg.into())
    }

    /// Create a secret lookup error
    pub fn secret_lookup(
        namespace: impl Into<String>,
        name: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::SecretLookup {
            namespace: namespace.into(),
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl std::fmt::Display) -> Self {
        Self::Network(msg.to_string())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the vendor API was reached and rejected the request.
    ///
    /// Useful for hosts that want to distinguish a misconfigured token
    /// from a flaky network before retrying.
    pub fn is_api_rejection(&self) -> bool {
        matches!(
            self,
            Self::ApiStatus { .. } | Self::ApiDecode { .. } | Self::ApiFailure { .. }
        )
    }
}
