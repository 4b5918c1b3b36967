// # Solver Trait
//
// Defines the plugin contract a DNS01 solver exposes to its host.
//
// ## Lifecycle
//
// ```text
// Uninitialized --initialize()--> Initialized
// ```
//
// Once initialized, `present` and `cleanup` may be called any number of
// times, in any order, concurrently or sequentially.
//
// ## Usage
//
// ```rust,ignore
// use dns01_core::{Solver, SecretStoreConfig};
//
// let mut solver = /* Solver implementation */;
// solver.initialize(&SecretStoreConfig::Memory, None).await?;
// solver.present(&request).await?;
// solver.cleanup(&request).await?;
// ```

use async_trait::async_trait;

use crate::challenge::ChallengeRequest;
use crate::config::SecretStoreConfig;

/// Signal fired by the host when it is shutting down
pub type StopSignal = tokio::sync::oneshot::Receiver<()>;

/// Trait for DNS01 solver implementations
///
/// # Stateless Calls
///
/// `present` and `cleanup` must not depend on anything a previous call left
/// behind. Each call loads its own config from the request, resolves its own
/// credential, and performs its provider call.
///
/// # No Retries
///
/// A failed call returns its error unchanged. Retry policy belongs to the
/// host, which sees the same challenge again on its next reconcile.
#[async_trait]
pub trait Solver: Send + Sync {
    /// Constant identifier the host registers the solver under
    fn name(&self) -> &'static str;

    /// Create the TXT record for the challenge
    ///
    /// Must be idempotent: presenting the same record twice is not an error.
    async fn present(&self, request: &ChallengeRequest) -> Result<(), crate::Error>;

    /// Remove the TXT record for the challenge
    ///
    /// Must be idempotent: cleaning up a record that is already gone is not
    /// an error as far as the solver is concerned.
    async fn cleanup(&self, request: &ChallengeRequest) -> Result<(), crate::Error>;

    /// Connect the solver to its secret store
    ///
    /// Failure here is fatal to the solver instance.
    ///
    /// # Parameters
    ///
    /// - `config`: Secret store connection configuration
    /// - `stop`: Fires when the host shuts down
    async fn initialize(
        &mut self,
        config: &SecretStoreConfig,
        stop: Option<StopSignal>,
    ) -> Result<(), crate::Error>;
}
