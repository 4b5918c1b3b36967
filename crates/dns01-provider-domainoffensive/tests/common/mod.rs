//! Shared fixtures for solver contract tests
//!
//! Every test gets its own mock vendor endpoint and an in-memory secret
//! store holding `cert-manager/do-credentials` with `token = abc`.

#![allow(dead_code)]

use dns01_core::{ChallengeRequest, MemorySecretStore, Secret};
use dns01_provider_domainoffensive::DomainOffensiveSolver;
use serde_json::json;
use std::sync::Arc;
use wiremock::MockServer;

pub const NAMESPACE: &str = "cert-manager";
pub const SECRET_NAME: &str = "do-credentials";
pub const TOKEN: &str = "abc";
pub const FQDN: &str = "_acme-challenge.example.com.";
pub const VALUE: &str = "xyz";
pub const API_PATH: &str = "/api/letsencrypt";

/// Store holding the default credentials
pub async fn secret_store() -> MemorySecretStore {
    let store = MemorySecretStore::new();
    store
        .insert(NAMESPACE, SECRET_NAME, Secret::new().with_entry("token", TOKEN))
        .await;
    store
}

/// Solver wired to `store`
pub fn solver_with(store: MemorySecretStore) -> DomainOffensiveSolver {
    DomainOffensiveSolver::with_secret_store(Arc::new(store))
}

/// Endpoint URL on the mock server
pub fn api_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), API_PATH)
}

/// Challenge pointing at `api_url` with the default secret reference
pub fn challenge(api_url: &str) -> ChallengeRequest {
    ChallengeRequest::new(FQDN, VALUE, NAMESPACE)
        .with_zone("example.com.")
        .with_config(json!({
            "apiUrl": api_url,
            "secretKeyRef": { "name": SECRET_NAME, "key": "token" }
        }))
}

/// Raw query strings of every request the server saw
pub async fn received_queries(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.query().unwrap_or_default().to_string())
        .collect()
}
