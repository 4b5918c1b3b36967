//! Core traits for DNS01 solvers
//!
//! This module defines the abstract interfaces the solver and its host are built on.
//!
//! - [`Solver`]: The plugin contract driven by the host
//! - [`SecretStore`]: Namespaced credential lookup

pub mod secret_store;
pub mod solver;

pub use secret_store::{Secret, SecretStore};
pub use solver::{Solver, StopSignal};
