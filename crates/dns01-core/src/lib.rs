// # dns01-core
//
// Core library for ACME DNS01 challenge solvers.
//
// ## Architecture Overview
//
// This library provides the contract a DNS01 solver plugin is written against:
// - **Solver**: Trait the hosting framework drives (`present`, `cleanup`, `initialize`)
// - **SecretStore**: Trait for namespaced credential lookup
// - **ChallengeRequest**: The challenge as handed over by the host
// - **WebhookHost**: Dispatches challenge payloads to a single solver
//
// ## Design Principles
//
// 1. **Stateless Calls**: Every `present`/`cleanup` resolves its own config and credentials
// 2. **Weak Credential Coupling**: Solvers hold a lookup handle, never secret material
// 3. **No Hidden Retries**: Failures surface verbatim; the host owns retry policy
// 4. **Library-First**: The daemon is a thin shell over this crate

pub mod challenge;
pub mod config;
pub mod error;
pub mod host;
pub mod secret;
pub mod traits;

// Re-export core types for convenience
pub use challenge::{ChallengeAction, ChallengePayload, ChallengeRequest, ChallengeResponse};
pub use config::{SecretKeySelector, SecretStoreConfig};
pub use error::{Error, Result};
pub use host::WebhookHost;
pub use secret::{FileSecretStore, MemorySecretStore, Secret};
pub use traits::{SecretStore, Solver, StopSignal};
