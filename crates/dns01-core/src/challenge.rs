// # Challenge Types
//
// The challenge request handed to a solver, and the payload envelope the
// host exchanges with the ACME issuer.
//
// ## Wire Format
//
// ```json
// {
//   "apiVersion": "acme.cert-manager.io/v1alpha1",
//   "kind": "ChallengePayload",
//   "request": {
//     "uid": "7d1c...",
//     "action": "Present",
//     "type": "dns-01",
//     "dnsName": "example.com",
//     "key": "xyz",
//     "resourceNamespace": "cert-manager",
//     "resolvedFQDN": "_acme-challenge.example.com.",
//     "resolvedZone": "example.com.",
//     "config": { "secretKeyRef": { "name": "do-credentials", "key": "token" } }
//   }
// }
// ```

use serde::{Deserialize, Serialize};

/// API version of the payload envelope
pub const PAYLOAD_API_VERSION: &str = "acme.cert-manager.io/v1alpha1";

/// Kind of the payload envelope
pub const PAYLOAD_KIND: &str = "ChallengePayload";

/// What the host asks the solver to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeAction {
    /// Create the TXT record
    Present,
    /// Remove the TXT record
    CleanUp,
}

/// A single DNS01 challenge as provided by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Correlation id, echoed back in the response
    #[serde(default)]
    pub uid: String,

    /// Requested action (only meaningful to the host dispatcher)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ChallengeAction>,

    /// Challenge type, normally `dns-01`
    #[serde(default, rename = "type")]
    pub challenge_type: String,

    /// Domain name the certificate is requested for
    #[serde(default)]
    pub dns_name: String,

    /// Expected TXT record value
    #[serde(default)]
    pub key: String,

    /// Namespace scoping the credential lookup
    #[serde(default)]
    pub resource_namespace: String,

    /// Fully qualified record name, trailing dot optional
    #[serde(default, rename = "resolvedFQDN")]
    pub resolved_fqdn: String,

    /// Zone the record lives in
    #[serde(default)]
    pub resolved_zone: String,

    /// Whether ambient credentials may be used
    #[serde(default)]
    pub allow_ambient_credentials: bool,

    /// Opaque solver configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    /// Create a request for the given record and value
    pub fn new(
        resolved_fqdn: impl Into<String>,
        key: impl Into<String>,
        resource_namespace: impl Into<String>,
    ) -> Self {
        Self {
            challenge_type: "dns-01".to_string(),
            key: key.into(),
            resource_namespace: resource_namespace.into(),
            resolved_fqdn: resolved_fqdn.into(),
            ..Self::default()
        }
    }

    /// Attach a solver config blob
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.resolved_zone = zone.into();
        self
    }

    /// Set the action and correlation id
    pub fn with_action(mut self, uid: impl Into<String>, action: ChallengeAction) -> Self {
        self.uid = uid.into();
        self.action = Some(action);
        self
    }
}

/// Status detail attached to a failed response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

/// Outcome of a challenge, as reported back to the issuer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Correlation id copied from the request
    #[serde(default)]
    pub uid: String,

    /// Whether the action succeeded
    pub success: bool,

    /// Error detail, only set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChallengeStatus>,
}

impl ChallengeResponse {
    /// Successful response for `uid`
    pub fn ok(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: true,
            status: None,
        }
    }

    /// Failed response for `uid` carrying `message`
    pub fn failed(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: false,
            status: Some(ChallengeStatus {
                message: message.into(),
            }),
        }
    }
}

/// Envelope exchanged between issuer and host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePayload {
    /// Always [`PAYLOAD_API_VERSION`] on output
    #[serde(default)]
    pub api_version: String,

    /// Always [`PAYLOAD_KIND`] on output
    #[serde(default)]
    pub kind: String,

    /// Incoming request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,

    /// Outgoing response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

impl ChallengePayload {
    /// Wrap a request
    pub fn from_request(request: ChallengeRequest) -> Self {
        Self {
            api_version: PAYLOAD_API_VERSION.to_string(),
            kind: PAYLOAD_KIND.to_string(),
            request: Some(request),
            response: None,
        }
    }

    /// Wrap a response, keeping the request for correlation
    pub fn with_response(mut self, response: ChallengeResponse) -> Self {
        self.api_version = PAYLOAD_API_VERSION.to_string();
        self.kind = PAYLOAD_KIND.to_string();
        self.response = Some(response);
        self
    }
}
