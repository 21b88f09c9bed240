//! Network Selection - Passphrase Constants
//!
//! Every signing request is scoped to a network by its passphrase.
//! The connector owns one `Network` and injects the matching
//! passphrase into each request it forwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::WalletError;

/// Passphrase of the Stellar test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Passphrase of the Stellar public network.
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Network a connector signs for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
  /// Test network (default).
  #[default]
  Testnet,
  /// Public network.
  Mainnet,
}

impl Network {
  /// Passphrase constant for this network.
  pub fn passphrase(self) -> &'static str {
    match self {
      Network::Testnet => TESTNET_PASSPHRASE,
      Network::Mainnet => MAINNET_PASSPHRASE,
    }
  }

  /// Config-file name of this network.
  pub fn as_str(self) -> &'static str {
    match self {
      Network::Testnet => "testnet",
      Network::Mainnet => "mainnet",
    }
  }
}

impl fmt::Display for Network {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Network {
  type Err = WalletError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "testnet" => Ok(Network::Testnet),
      "mainnet" => Ok(Network::Mainnet),
      other => Err(WalletError::UnknownNetwork(other.to_string())),
    }
  }
}
