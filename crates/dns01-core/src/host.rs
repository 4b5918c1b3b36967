//! Challenge payload dispatch
//!
//! [`WebhookHost`] is the thin layer between the issuer's payload envelope
//! and a single [`Solver`]. The API group the solver is registered under is
//! an explicit constructor argument, not process-global state.

use crate::challenge::{ChallengeAction, ChallengePayload, ChallengeResponse};
use crate::config::SecretStoreConfig;
use crate::error::{Error, Result};
use crate::traits::{Solver, StopSignal};

/// API version segment of the solver resource path
const SOLVER_API_VERSION: &str = "v1alpha1";

/// Dispatches challenge payloads to one solver
#[derive(Debug)]
pub struct WebhookHost<S: Solver> {
    group_name: String,
    solver: S,
}

impl<S: Solver> WebhookHost<S> {
    /// Create a host for `solver` registered under `group_name`
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: `group_name` is empty
    pub fn new(group_name: impl Into<String>, solver: S) -> Result<Self> {
        let group_name = group_name.into();
        if group_name.trim().is_empty() {
            return Err(Error::config("GROUP_NAME must be specified"));
        }

        Ok(Self { group_name, solver })
    }

    /// API group the solver is registered under
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Resource path the issuer addresses this solver by
    pub fn resource_path(&self) -> String {
        format!(
            "/apis/{}/{}/{}",
            self.group_name,
            SOLVER_API_VERSION,
            self.solver.name()
        )
    }

    /// Borrow the hosted solver
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Initialize the hosted solver
    pub async fn initialize(
        &mut self,
        config: &SecretStoreConfig,
        stop: Option<StopSignal>,
    ) -> Result<()> {
        tracing::info!(
            "Initializing solver {} ({} secret store)",
            self.resource_path(),
            config.type_name()
        );
        self.solver.initialize(config, stop).await
    }

    /// Run the action a payload asks for and attach the outcome
    ///
    /// Solver errors never escape: they become a `success: false` response
    /// carrying the error message, which is what the issuer expects.
    pub async fn handle(&self, payload: ChallengePayload) -> ChallengePayload {
        let Some(request) = payload.request.clone() else {
            tracing::warn!("Received challenge payload without a request");
            return payload.with_response(ChallengeResponse::failed(
                "",
                "challenge payload has no request",
            ));
        };

        let uid = request.uid.clone();
        let outcome = match request.action {
            Some(ChallengeAction::Present) => self.solver.present(&request).await,
            Some(ChallengeAction::CleanUp) => self.solver.cleanup(&request).await,
            None => Err(Error::Other("challenge request has no action".to_string())),
        };

        let response = match outcome {
            Ok(()) => ChallengeResponse::ok(uid),
            Err(e) => ChallengeResponse::failed(uid, e.to_string()),
        };

        payload.with_response(response)
    }
}
