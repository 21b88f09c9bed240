//! Configuration Module - TOML-based Connector Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Network selection, the set of enabled wallets and the simulated
//! wallets used by headless runs are all externalized here.

pub mod loader;

use serde::Deserialize;

use crate::domain::network::Network;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Connector construction options.
  #[serde(default)]
  pub connector: ConnectorConfig,
  /// Logging options.
  #[serde(default)]
  pub logging: LoggingConfig,
  /// Development wallets injected into the headless environment.
  #[serde(default)]
  pub simulated_wallets: Vec<SimulatedWalletConfig>,
}

/// Options accepted by `WalletConnector` at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
  /// Network whose passphrase scopes every signature.
  #[serde(default)]
  pub network: Network,
  /// Reserved: the library never auto-connects on its own.
  #[serde(default)]
  pub auto_connect: bool,
  /// Wallet the binary connects to when `auto_connect` is set.
  #[serde(default)]
  pub preferred_wallet: Option<String>,
  /// Built-in wallets to register, in order. Empty means all of them.
  #[serde(default)]
  pub enabled_wallets: Vec<String>,
}

impl Default for ConnectorConfig {
  fn default() -> Self {
    Self {
      network: Network::Testnet,
      auto_connect: false,
      preferred_wallet: None,
      enabled_wallets: Vec::new(),
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Emit JSON lines instead of human-readable output.
  #[serde(default = "default_true")]
  pub json: bool,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      json: default_true(),
    }
  }
}

/// A simulated wallet answering one built-in wallet's API.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedWalletConfig {
  /// Built-in wallet id whose API is simulated (e.g., "freighter").
  pub id: String,
  /// Public key handed out on connect.
  pub public_key: String,
  /// HMAC key for simulated signatures.
  pub secret: String,
  /// Reject every connect request with this message.
  #[serde(default)]
  pub reject_connect: Option<String>,
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}
