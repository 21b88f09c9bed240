//! Wallet Models - Descriptors and Call Results
//!
//! Plain data shared by every wallet adapter and the connector.
//! Nothing here talks to a wallet; these are the normalized shapes
//! that each adapter translates its wallet's native responses into.

use serde::{Deserialize, Serialize};

/// Wallet identifier (e.g., "freighter").
pub type WalletId = String;

/// Account public key / address as returned by a wallet.
pub type PublicKey = String;

/// Immutable descriptor of one supported wallet.
///
/// `installed` is a snapshot taken when the adapter was constructed;
/// it is not re-evaluated when the hosting environment changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
  /// Unique registry key.
  pub id: WalletId,
  /// Human-readable name shown to users.
  pub name: String,
  /// Icon URL.
  pub icon: String,
  /// Short description.
  pub description: String,
  /// Install / landing page.
  pub website: String,
  /// Whether the wallet's injected object was present at construction.
  pub installed: bool,
  /// Whether the wallet works on mobile, when known.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mobile: Option<bool>,
}

/// Outcome of a successful `connect()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResult {
  /// Address the wallet authorized.
  pub public_key: PublicKey,
  /// Descriptor of the wallet that produced the key.
  pub wallet: WalletInfo,
}

/// Outcome of a signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionResult {
  /// Signed envelope, passed through opaquely from the wallet.
  #[serde(rename = "signedXDR")]
  pub signed_xdr: String,
  /// Address that signed, if known.
  ///
  /// `None` only when a wallet that needs no session signed
  /// without an account override.
  pub signer_address: Option<PublicKey>,
}

/// Optional parameters forwarded with a signing request.
///
/// Absent fields mean "let the wallet use its default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOptions {
  /// Network passphrase the signature is scoped to.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub network_passphrase: Option<String>,
  /// Account to sign with, for wallets holding several accounts.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub account_to_sign: Option<PublicKey>,
}

impl SignOptions {
  /// Options scoped to a network passphrase only.
  pub fn with_passphrase(passphrase: impl Into<String>) -> Self {
    Self {
      network_passphrase: Some(passphrase.into()),
      account_to_sign: None,
    }
  }

  /// Set the account override.
  pub fn account(mut self, account: impl Into<PublicKey>) -> Self {
    self.account_to_sign = Some(account.into());
    self
  }

  /// Returns true when no option is set.
  pub fn is_empty(&self) -> bool {
    self.network_passphrase.is_none() && self.account_to_sign.is_none()
  }
}
