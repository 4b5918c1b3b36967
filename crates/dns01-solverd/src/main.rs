// # dns01-solverd - One-shot DNS01 solver host
//
// This binary is a THIN integration layer: all solver logic lives in
// dns01-core and dns01-provider-domainoffensive.
//
// The binary is responsible for:
// 1. Reading process configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Connecting the solver to its secret store
// 4. Dispatching one challenge payload read from stdin
// 5. Writing the response payload to stdout
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `GROUP_NAME`: API group the solver is registered under (required)
// - `DNS01_SECRET_STORE_PATH`: Root of the mounted secret tree (required)
// - `DNS01_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// Logs go to stderr; stdout carries only the response payload.
//
// ## Example
//
// ```bash
// export GROUP_NAME=acme.example.com
// export DNS01_SECRET_STORE_PATH=/var/run/secrets/dns01
//
// dns01-solverd < challenge.json
// ```

use anyhow::{Context, Result};
use dns01_core::{ChallengePayload, SecretStoreConfig, WebhookHost};
use dns01_provider_domainoffensive::DomainOffensiveSolver;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// A challenge the solver rejected is still a clean exit: the failure is
/// reported in the response payload and the issuer decides whether to retry.
#[derive(Debug, Clone, Copy)]
enum SolverExitCode {
    /// Payload handled (successfully or not)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unreadable payload, store unreachable)
    RuntimeError = 2,
}

impl From<SolverExitCode> for ExitCode {
    fn from(code: SolverExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    group_name: String,
    secret_store_path: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let group_name = lookup("GROUP_NAME")
            .filter(|s| !s.trim().is_empty())
            .context("GROUP_NAME must be specified")?;

        Ok(Self {
            group_name,
            secret_store_path: lookup("DNS01_SECRET_STORE_PATH"),
            log_level: lookup("DNS01_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.secret_store_config()?.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DNS01_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Secret store connection configuration
    ///
    /// Always the file store: a one-shot process has no way to fill an
    /// in-memory store before the challenge arrives.
    fn secret_store_config(&self) -> Result<SecretStoreConfig> {
        let path = self
            .secret_store_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .context("DNS01_SECRET_STORE_PATH must be specified")?;

        Ok(SecretStoreConfig::File {
            path: PathBuf::from(path),
        })
    }

    fn max_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SolverExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return SolverExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.max_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SolverExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SolverExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config).await {
            error!("Solver error: {:#}", e);
            SolverExitCode::RuntimeError
        } else {
            SolverExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Initialize the solver, handle one payload, print the response
async fn run(config: Config) -> Result<()> {
    let store_config = config.secret_store_config()?;

    let mut host = WebhookHost::new(config.group_name.clone(), DomainOffensiveSolver::new())?;
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel();

    host.initialize(&store_config, Some(stop_rx))
        .await
        .context("failed to initialize solver")?;
    info!("Solver ready at {}", host.resource_path());

    let payload = read_payload().await?;
    let response = host.handle(payload).await;

    if let Some(ref outcome) = response.response {
        if outcome.success {
            info!("Challenge {} succeeded", outcome.uid);
        } else {
            error!("Challenge {} failed", outcome.uid);
        }
    }

    println!(
        "{}",
        serde_json::to_string(&response).context("failed to encode response payload")?
    );

    // Receiver may already be gone; nothing else is listening
    let _ = stop_tx.send(());
    Ok(())
}

/// Read and decode one challenge payload from stdin
async fn read_payload() -> Result<ChallengePayload> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("failed to read challenge payload from stdin")?;

    serde_json::from_str(&raw).context("failed to decode challenge payload")
}
