//! Stellar Wallet Connector — Headless Entry Point
//!
//! Drives the connector outside a browser, against the simulated
//! wallets declared in the config file.
//!
//! Usage: `wallet-connector [config.toml] [ENVELOPE]`
//!
//! Wiring sequence:
//! 1. Load config + validate
//! 2. Init tracing (JSON or human-readable)
//! 3. Inject one SimulatedWallet per `[[simulated_wallets]]` entry
//! 4. Build the WalletConnector from `[connector]`
//! 5. Report available / installed wallets
//! 6. If `auto_connect`, connect the preferred (or first installed) wallet
//! 7. If an envelope was given, sign it and print the result as JSON
//! 8. Disconnect and exit

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use stellar_wallet_connector::adapters::environment::{SimulatedWallet, StaticEnvironment};
use stellar_wallet_connector::adapters::wallets::WalletBinding;
use stellar_wallet_connector::config::{self, AppConfig};
use stellar_wallet_connector::usecases::WalletConnector;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let envelope = args.next();

    // ── 1. Load configuration ───────────────────────────────
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %config.connector.network,
        "Starting wallet connector"
    );

    // ── 3. Inject simulated wallets ─────────────────────────
    let env = Arc::new(build_environment(&config));

    // ── 4. Build the connector ──────────────────────────────
    let mut connector = WalletConnector::from_config(&config.connector, env)
        .context("Failed to build wallet connector")?;

    // ── 5. Report wallets ───────────────────────────────────
    for wallet in connector.available_wallets() {
        info!(
            id = %wallet.id,
            name = %wallet.name,
            installed = wallet.installed,
            "Wallet available"
        );
    }

    // ── 6. Optional auto-connect ────────────────────────────
    if config.connector.auto_connect {
        let target = config
            .connector
            .preferred_wallet
            .clone()
            .or_else(|| connector.installed_wallets().first().map(|w| w.id.clone()));

        match target {
            Some(wallet_id) => {
                let result = connector
                    .connect(&wallet_id)
                    .await
                    .with_context(|| format!("Failed to connect to {wallet_id}"))?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            None => warn!("auto_connect is set but no wallet is installed"),
        }
    }

    // ── 7. Optional signing ─────────────────────────────────
    if let Some(envelope) = envelope {
        if connector.is_connected() {
            let signed = connector
                .sign_transaction(&envelope)
                .await
                .context("Failed to sign envelope")?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
        } else {
            warn!("Envelope given but no wallet is connected; enable auto_connect");
        }
    }

    // ── 8. Disconnect ───────────────────────────────────────
    if let Err(e) = connector.disconnect().await {
        warn!(error = %e, "Disconnect reported an error");
    }

    info!("Shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Headless environment populated from `[[simulated_wallets]]`.
fn build_environment(config: &AppConfig) -> StaticEnvironment {
    let env = StaticEnvironment::new();
    for sim in &config.simulated_wallets {
        // ids were validated by the loader
        let Some(binding) = WalletBinding::builtin(&sim.id) else {
            continue;
        };
        let mut wallet = SimulatedWallet::new(*binding, sim.public_key.clone(), sim.secret.clone());
        if let Some(message) = &sim.reject_connect {
            wallet = wallet.rejecting_connect(message.clone());
        }
        env.insert(binding.global, Arc::new(wallet));
        info!(wallet = %binding.name, global = binding.global, "Simulated wallet injected");
    }
    env
}
