// # Domain Offensive DNS01 Solver
//
// This crate provides an ACME DNS01 solver for Domain Offensive (do.de).
//
// ## Scope
//
// - Makes exactly one HTTP request per `present`/`cleanup` call
// - Resolves the API token from the secret store on every call
// - Full error propagation to the host (host handles retries)
// - NO retry logic, NO backoff, NO caching
// - NO background tasks
//
// ## Security Requirements
//
// - API token NEVER appears in logs, nor do request URLs (which carry it)
// - API token is read from a secret referenced by the challenge config
// - Missing credential reference fails the call before any network I/O
//
// ## API Reference
//
// - Create TXT: GET `https://my.do.de/api/letsencrypt?domain=...&token=...&value=...`
// - Delete TXT: same, plus `action=delete`
// - Response: `{"success": true}` with HTTP 200

pub mod client;
pub mod config;
pub mod credentials;
pub mod solver;

pub use client::{DomainOffensiveClient, RecordAction};
pub use config::{DEFAULT_API_URL, SolverConfig, load_config};
pub use credentials::resolve_token;
pub use solver::{DomainOffensiveSolver, SOLVER_NAME};
