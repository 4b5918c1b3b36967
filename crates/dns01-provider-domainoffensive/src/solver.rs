//! The Domain Offensive solver
//!
//! Each call runs the same pipeline:
//!
//! ```text
//! load config -> resolve token -> call API (present | delete)
//! ```
//!
//! Any failure aborts the call. It is logged and returned unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use dns01_core::{
    ChallengeRequest, Error, Result, SecretStore, SecretStoreConfig, Solver, StopSignal,
};

use crate::client::{DomainOffensiveClient, RecordAction};
use crate::config::load_config;
use crate::credentials::resolve_token;

/// Name the solver is registered under
pub const SOLVER_NAME: &str = "domain-offensive";

/// ACME DNS01 solver backed by the Domain Offensive API
///
/// # Lifecycle
///
/// Created uninitialized by [`new`](Self::new); [`initialize`](Solver::initialize)
/// connects the secret store. [`with_secret_store`](Self::with_secret_store)
/// creates an already initialized solver.
///
/// # Concurrency
///
/// The store handle and HTTP client are read-only after initialization, so
/// `present` and `cleanup` can run concurrently on a shared reference.
#[derive(Debug, Default)]
pub struct DomainOffensiveSolver {
    /// Secret store handle, set by initialize
    secrets: Option<Arc<dyn SecretStore>>,

    /// HTTP client for API requests
    client: DomainOffensiveClient,
}

impl DomainOffensiveSolver {
    /// Create an uninitialized solver
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver that is already connected to `store`
    pub fn with_secret_store(store: Arc<dyn SecretStore>) -> Self {
        Self {
            secrets: Some(store),
            client: DomainOffensiveClient::new(),
        }
    }

    /// Replace the HTTP client
    pub fn with_client(mut self, client: DomainOffensiveClient) -> Self {
        self.client = client;
        self
    }

    /// Whether a secret store is connected
    pub fn is_initialized(&self) -> bool {
        self.secrets.is_some()
    }

    fn secret_store(&self) -> Result<&dyn SecretStore> {
        self.secrets
            .as_deref()
            .ok_or_else(|| Error::NotInitialized(SOLVER_NAME.to_string()))
    }

    async fn run(&self, request: &ChallengeRequest, action: RecordAction) -> Result<()> {
        let function = match action {
            RecordAction::Present => "Present",
            RecordAction::CleanUp => "CleanUp",
        };

        tracing::info!(
            "call function {}: namespace={}, zone={}, fqdn={}",
            function,
            request.resource_namespace,
            request.resolved_zone,
            request.resolved_fqdn
        );

        let result = self.apply(request, action).await;
        if let Err(ref e) = result {
            tracing::error!(
                "{} failed for {} (namespace {}): {}",
                function,
                request.resolved_fqdn,
                request.resource_namespace,
                e
            );
        }
        result
    }

    async fn apply(&self, request: &ChallengeRequest, action: RecordAction) -> Result<()> {
        let store = self.secret_store()?;
        let config = load_config(request.config.as_ref())?;

        let token =
            resolve_token(store, &request.resource_namespace, &config.secret_key_ref).await?;

        self.client
            .call_api(
                &config.api_url,
                &request.resolved_fqdn,
                &request.key,
                &token,
                action,
            )
            .await
    }
}

#[async_trait]
impl Solver for DomainOffensiveSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        self.run(request, RecordAction::Present).await
    }

    async fn cleanup(&self, request: &ChallengeRequest) -> Result<()> {
        self.run(request, RecordAction::CleanUp).await
    }

    async fn initialize(
        &mut self,
        config: &SecretStoreConfig,
        _stop: Option<StopSignal>,
    ) -> Result<()> {
        // The store handle owns no background work, so there is nothing for
        // the stop signal to tear down.
        let store = dns01_core::secret::connect(config).await?;
        self.secrets = Some(store);

        tracing::info!(
            "Solver {} initialized with {} secret store",
            SOLVER_NAME,
            config.type_name()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns01_core::MemorySecretStore;

    #[test]
    fn test_solver_name() {
        assert_eq!(DomainOffensiveSolver::new().name(), "domain-offensive");
    }

    #[tokio::test]
    async fn test_uninitialized_solver_fails() {
        let solver = DomainOffensiveSolver::new();
        assert!(!solver.is_initialized());

        let request = ChallengeRequest::new("_acme-challenge.example.com.", "xyz", "cert-manager");
        let result = solver.present(&request).await;
        assert!(matches!(result, Err(Error::NotInitialized(_))));

        let result = solver.cleanup(&request).await;
        assert!(matches!(result, Err(Error::NotInitialized(_))));
    }

    #[tokio::test]
    async fn test_initialize_memory_store() {
        let mut solver = DomainOffensiveSolver::new();
        solver
            .initialize(&SecretStoreConfig::Memory, None)
            .await
            .unwrap();
        assert!(solver.is_initialized());
    }

    #[tokio::test]
    async fn test_missing_key_ref_fails_before_lookup() {
        let solver = DomainOffensiveSolver::with_secret_store(Arc::new(MemorySecretStore::new()));
        let request = ChallengeRequest::new("_acme-challenge.example.com.", "xyz", "cert-manager")
            .with_config(serde_json::json!({}));

        let result = solver.present(&request).await;
        assert!(matches!(result, Err(Error::MissingCredentialKey)));
    }
}
