//! Test doubles and common utilities for contract tests
//!
//! This module provides minimal test doubles that verify the host/solver
//! contract without talking to any DNS provider.

#![allow(dead_code)]

use dns01_core::error::{Error, Result};
use dns01_core::{ChallengeRequest, SecretStoreConfig, Solver, StopSignal};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A Solver that records calls instead of touching DNS
#[derive(Debug, Default)]
pub struct RecordingSolver {
    /// Call counter for present()
    present_call_count: Arc<AtomicUsize>,
    /// Call counter for cleanup()
    cleanup_call_count: Arc<AtomicUsize>,
    /// Set once initialize() succeeded
    initialized: AtomicBool,
    /// Recorded FQDNs, in call order
    fqdns: Arc<std::sync::Mutex<Vec<String>>>,
    /// When set, present/cleanup fail with this message
    failure: Option<String>,
}

impl RecordingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver whose present/cleanup always fail
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn present_call_count(&self) -> usize {
        self.present_call_count.load(Ordering::SeqCst)
    }

    pub fn cleanup_call_count(&self) -> usize {
        self.cleanup_call_count.load(Ordering::SeqCst)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn fqdns(&self) -> Vec<String> {
        self.fqdns.lock().unwrap().clone()
    }

    fn record(&self, request: &ChallengeRequest) -> Result<()> {
        self.fqdns.lock().unwrap().push(request.resolved_fqdn.clone());
        match &self.failure {
            Some(message) => Err(Error::ApiFailure {
                body: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Solver for RecordingSolver {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        self.present_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(request)
    }

    async fn cleanup(&self, request: &ChallengeRequest) -> Result<()> {
        self.cleanup_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(request)
    }

    async fn initialize(
        &mut self,
        config: &SecretStoreConfig,
        _stop: Option<StopSignal>,
    ) -> Result<()> {
        dns01_core::secret::connect(config).await?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A request for `_acme-challenge.example.com.` carrying `action`
pub fn request_for(uid: &str, action: dns01_core::ChallengeAction) -> ChallengeRequest {
    ChallengeRequest::new("_acme-challenge.example.com.", "xyz", "cert-manager")
        .with_zone("example.com.")
        .with_action(uid, action)
}
