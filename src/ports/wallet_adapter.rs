//! Wallet Adapter Port - Common Wallet Contract
//!
//! Defines the trait every wallet integration satisfies, whatever the
//! shape of its injected API. The connector only ever talks to wallets
//! through this trait.

use async_trait::async_trait;

use crate::domain::error::WalletError;
use crate::domain::wallet::{ConnectResult, PublicKey, SignOptions, SignTransactionResult, WalletInfo};

/// Normalized connect/sign/disconnect contract for one wallet.
///
/// Each adapter privately owns its session key: set by a successful
/// `connect`, cleared by `disconnect`. Mutating calls take `&mut self`,
/// so a single owner can never have two transitions in flight.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
  /// Descriptor of this wallet (`installed` is a construction-time snapshot).
  fn wallet_info(&self) -> &WalletInfo;

  /// Whether the wallet's injected object is present right now.
  ///
  /// Side-effect free and infallible.
  fn is_installed(&self) -> bool;

  /// Ask the wallet to authorize and reveal a public key.
  ///
  /// # Errors
  /// `NotInstalled` before any wallet call when the injected object is
  /// absent; `Connection` when the wallet rejects or fails.
  async fn connect(&mut self) -> Result<ConnectResult, WalletError>;

  /// End the session.
  ///
  /// Calls the wallet's native disconnect when it has one, then clears
  /// the local session unconditionally. A no-op when not connected.
  ///
  /// # Errors
  /// `Disconnect` when the native call fails; the local session is
  /// already cleared at that point.
  async fn disconnect(&mut self) -> Result<(), WalletError>;

  /// Sign an opaque transaction envelope.
  async fn sign_transaction(
    &self,
    xdr: &str,
    options: Option<SignOptions>,
  ) -> Result<SignTransactionResult, WalletError>;

  /// Sign an authorization entry.
  ///
  /// Implementations without dedicated handling should delegate to
  /// [`sign_auth_entry_as_transaction`].
  async fn sign_auth_entry(
    &self,
    entry_xdr: &str,
    options: Option<SignOptions>,
  ) -> Result<SignTransactionResult, WalletError>;

  /// Current session key, if any.
  fn public_key(&self) -> Option<PublicKey>;

  /// True iff a session key is held.
  fn is_connected(&self) -> bool;
}

/// Sign an auth entry exactly like a transaction.
///
/// No supported wallet distinguishes the two today.
pub async fn sign_auth_entry_as_transaction<A>(
  adapter: &A,
  entry_xdr: &str,
  options: Option<SignOptions>,
) -> Result<SignTransactionResult, WalletError>
where
  A: WalletAdapter + ?Sized,
{
  adapter.sign_transaction(entry_xdr, options).await
}
