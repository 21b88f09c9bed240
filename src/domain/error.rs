//! Wallet Errors - Normalized Failure Taxonomy
//!
//! Every failure crossing the adapter or connector boundary is a
//! `WalletError`. Messages are meant to be shown to users directly.

use thiserror::Error;

/// Failure reported by an injected wallet object itself.
///
/// Carries the wallet's own message verbatim (e.g., "User denied access").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WalletCallError {
  /// Message as reported by the wallet.
  pub message: String,
}

impl WalletCallError {
  /// Wrap a wallet-side message.
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Errors surfaced by wallet adapters and the connector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
  /// The wallet's injected object is absent from the environment.
  #[error("{wallet} is not installed. Please install it from {website}")]
  NotInstalled { wallet: String, website: String },

  /// An adapter was asked to sign without holding a session.
  #[error("{wallet} not connected")]
  NotConnected { wallet: String },

  /// The connector was asked to sign with no active wallet.
  #[error("No wallet connected")]
  NoActiveWallet,

  /// `connect` was called with an id no adapter is registered under.
  #[error("Wallet with id \"{0}\" not found")]
  UnknownWallet(String),

  /// Two adapters were registered under the same id.
  #[error("Wallet id \"{0}\" is registered more than once")]
  DuplicateWallet(String),

  /// A network name other than testnet/mainnet.
  #[error("Unknown network \"{0}\" (expected \"testnet\" or \"mainnet\")")]
  UnknownNetwork(String),

  /// The wallet rejected or failed the connection request.
  #[error("Failed to connect to {wallet}: {source}")]
  Connection {
    wallet: String,
    #[source]
    source: WalletCallError,
  },

  /// The wallet rejected or failed a signing request.
  #[error("Failed to sign transaction with {wallet}: {source}")]
  Signing {
    wallet: String,
    #[source]
    source: WalletCallError,
  },

  /// The wallet's native disconnect call failed.
  ///
  /// Local session state has already been cleared when this is returned.
  #[error("Failed to disconnect from {wallet}: {source}")]
  Disconnect {
    wallet: String,
    #[source]
    source: WalletCallError,
  },

  /// The wallet answered with a shape its binding does not describe.
  #[error("{wallet} returned an unexpected response from {method}(): expected {expected}")]
  MalformedResponse {
    wallet: String,
    method: String,
    expected: String,
  },
}

impl WalletError {
  /// True for both the adapter-level and connector-level "not connected" cases.
  pub fn is_not_connected(&self) -> bool {
    matches!(
      self,
      WalletError::NotConnected { .. } | WalletError::NoActiveWallet
    )
  }
}
