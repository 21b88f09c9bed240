//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;
use crate::adapters::wallets::binding::WalletBinding;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    network = %config.connector.network,
    wallets = config.connector.enabled_wallets.len(),
    simulated = config.simulated_wallets.len(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Known, non-repeated wallet ids
/// - A preferred wallet that is actually enabled
/// - Complete simulated wallet definitions
fn validate_config(config: &AppConfig) -> Result<()> {
  let mut seen = HashSet::new();
  for id in &config.connector.enabled_wallets {
    anyhow::ensure!(
      WalletBinding::builtin(id).is_some(),
      "Unknown wallet \"{}\" in enabled_wallets",
      id
    );
    anyhow::ensure!(
      seen.insert(id.as_str()),
      "Wallet \"{}\" is listed more than once in enabled_wallets",
      id
    );
  }

  if let Some(preferred) = &config.connector.preferred_wallet {
    anyhow::ensure!(
      WalletBinding::builtin(preferred).is_some(),
      "Unknown preferred_wallet \"{}\"",
      preferred
    );
    anyhow::ensure!(
      config.connector.enabled_wallets.is_empty() || seen.contains(preferred.as_str()),
      "preferred_wallet \"{}\" is not in enabled_wallets",
      preferred
    );
  }

  let mut simulated = HashSet::new();
  for (i, wallet) in config.simulated_wallets.iter().enumerate() {
    anyhow::ensure!(
      WalletBinding::builtin(&wallet.id).is_some(),
      "Simulated wallet {} has unknown id \"{}\"",
      i,
      wallet.id
    );
    anyhow::ensure!(
      simulated.insert(wallet.id.as_str()),
      "Wallet \"{}\" is simulated more than once",
      wallet.id
    );
    anyhow::ensure!(
      !wallet.public_key.is_empty(),
      "Simulated wallet {} ({}) has empty public_key",
      i,
      wallet.id
    );
    anyhow::ensure!(
      !wallet.secret.is_empty(),
      "Simulated wallet {} ({}) has empty secret",
      i,
      wallet.id
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::network::Network;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.connector.network, Network::Testnet);
    assert!(!config.connector.auto_connect);
    assert!(config.connector.enabled_wallets.is_empty());
    assert_eq!(config.logging.level, "info");
    assert!(config.simulated_wallets.is_empty());
  }

  #[test]
  fn test_full_config() {
    let config = parse_config(
      r#"
        [connector]
        network = "mainnet"
        auto_connect = true
        preferred_wallet = "rabet"
        enabled_wallets = ["freighter", "rabet"]

        [logging]
        level = "debug"
        json = false

        [[simulated_wallets]]
        id = "rabet"
        public_key = "GKEY"
        secret = "dev"
      "#,
    )
    .unwrap();

    assert_eq!(config.connector.network, Network::Mainnet);
    assert_eq!(config.connector.preferred_wallet.as_deref(), Some("rabet"));
    assert_eq!(config.connector.enabled_wallets, vec!["freighter", "rabet"]);
    assert!(!config.logging.json);
    assert_eq!(config.simulated_wallets[0].public_key, "GKEY");
  }

  #[test]
  fn test_rejects_unknown_network() {
    assert!(parse_config("[connector]\nnetwork = \"futurenet\"").is_err());
  }

  #[test]
  fn test_rejects_unknown_and_duplicate_wallets() {
    assert!(parse_config("[connector]\nenabled_wallets = [\"lobstr\"]").is_err());
    assert!(parse_config("[connector]\nenabled_wallets = [\"albedo\", \"albedo\"]").is_err());
  }

  #[test]
  fn test_rejects_preferred_wallet_not_enabled() {
    let err = parse_config(
      "[connector]\npreferred_wallet = \"xbull\"\nenabled_wallets = [\"freighter\"]",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("not in enabled_wallets"));
  }

  #[test]
  fn test_rejects_incomplete_simulated_wallet() {
    let err = parse_config(
      "[[simulated_wallets]]\nid = \"freighter\"\npublic_key = \"\"\nsecret = \"s\"",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("empty public_key"));
  }
}
