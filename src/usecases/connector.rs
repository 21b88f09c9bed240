//! Wallet Connector Use Case - Single Active Wallet Session
//!
//! Owns the registry of wallet adapters, tracks which one (if any) is
//! active, and injects the configured network passphrase into every
//! signing request. At most one adapter is ever connected through a
//! connector: switching wallets fully disconnects the previous one
//! before the next connect is attempted.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::adapters::wallets::{BoundWalletAdapter, WalletBinding, default_adapters};
use crate::config::ConnectorConfig;
use crate::domain::error::WalletError;
use crate::domain::network::Network;
use crate::domain::wallet::{ConnectResult, PublicKey, SignOptions, SignTransactionResult, WalletId, WalletInfo};
use crate::ports::environment::WalletEnvironment;
use crate::ports::wallet_adapter::WalletAdapter;

/// Construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectorOptions {
  /// Network whose passphrase is injected when signing.
  pub network: Network,
  /// Reserved; the connector never auto-connects by itself.
  pub auto_connect: bool,
}

/// Observable connection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
  #[default]
  Disconnected,
  Connected {
    wallet_id: WalletId,
    public_key: PublicKey,
  },
}

/// Entry point for discovering, connecting and signing with wallets.
pub struct WalletConnector {
  /// Adapters in registration order.
  adapters: Vec<Box<dyn WalletAdapter>>,
  /// Wallet id → position in `adapters`.
  index: HashMap<WalletId, usize>,
  /// Position of the active adapter; it always reports connected.
  active: Option<usize>,
  options: ConnectorOptions,
  state: watch::Sender<ConnectionState>,
}

impl WalletConnector {
  /// Connector over the four built-in wallets.
  pub fn new(options: ConnectorOptions, env: Arc<dyn WalletEnvironment>) -> Self {
    Self::assemble(options, default_adapters(env))
  }

  /// Connector over a caller-supplied adapter list, used verbatim.
  ///
  /// # Errors
  /// `DuplicateWallet` when two adapters share an id.
  pub fn with_adapters(
    options: ConnectorOptions,
    adapters: Vec<Box<dyn WalletAdapter>>,
  ) -> Result<Self, WalletError> {
    let mut seen = HashSet::new();
    for adapter in &adapters {
      let id = &adapter.wallet_info().id;
      if !seen.insert(id.as_str()) {
        return Err(WalletError::DuplicateWallet(id.clone()));
      }
    }
    Ok(Self::assemble(options, adapters))
  }

  /// Connector built from configuration.
  ///
  /// Registers the enabled built-in wallets (all of them when the list
  /// is empty).
  pub fn from_config(config: &ConnectorConfig, env: Arc<dyn WalletEnvironment>) -> Result<Self, WalletError> {
    let options = ConnectorOptions {
      network: config.network,
      auto_connect: config.auto_connect,
    };

    if config.enabled_wallets.is_empty() {
      return Ok(Self::new(options, env));
    }

    let adapters = config
      .enabled_wallets
      .iter()
      .map(|id| {
        WalletBinding::builtin(id)
          .map(|binding| Box::new(BoundWalletAdapter::new(*binding, Arc::clone(&env))) as Box<dyn WalletAdapter>)
          .ok_or_else(|| WalletError::UnknownWallet(id.clone()))
      })
      .collect::<Result<Vec<_>, _>>()?;

    Self::with_adapters(options, adapters)
  }

  fn assemble(options: ConnectorOptions, adapters: Vec<Box<dyn WalletAdapter>>) -> Self {
    let index = adapters
      .iter()
      .enumerate()
      .map(|(i, adapter)| (adapter.wallet_info().id.clone(), i))
      .collect();
    let (state, _) = watch::channel(ConnectionState::Disconnected);

    info!(
      adapters = adapters.len(),
      network = %options.network,
      "Wallet connector initialized"
    );

    Self {
      adapters,
      index,
      active: None,
      options,
      state,
    }
  }

  // =========================================================================
  // Queries
  // =========================================================================

  /// Every registered wallet, in registration order.
  pub fn available_wallets(&self) -> Vec<WalletInfo> {
    self
      .adapters
      .iter()
      .map(|adapter| adapter.wallet_info().clone())
      .collect()
  }

  /// Registered wallets whose construction-time snapshot says installed.
  pub fn installed_wallets(&self) -> Vec<WalletInfo> {
    self
      .available_wallets()
      .into_iter()
      .filter(|wallet| wallet.installed)
      .collect()
  }

  /// Descriptor of the active wallet.
  pub fn current_wallet(&self) -> Option<&WalletInfo> {
    self.active_adapter().map(|adapter| adapter.wallet_info())
  }

  /// Whether a wallet session is active.
  pub fn is_connected(&self) -> bool {
    self
      .active_adapter()
      .is_some_and(|adapter| adapter.is_connected())
  }

  /// Public key of the active session.
  pub fn public_key(&self) -> Option<PublicKey> {
    self.active_adapter().and_then(|adapter| adapter.public_key())
  }

  /// Adapter registered under `wallet_id`.
  pub fn adapter(&self, wallet_id: &str) -> Option<&dyn WalletAdapter> {
    self
      .index
      .get(wallet_id)
      .map(|&i| &*self.adapters[i])
  }

  pub fn network(&self) -> Network {
    self.options.network
  }

  /// Passphrase injected into every signing request.
  pub fn network_passphrase(&self) -> &'static str {
    self.options.network.passphrase()
  }

  pub fn options(&self) -> ConnectorOptions {
    self.options
  }

  /// Current connection state.
  pub fn state(&self) -> ConnectionState {
    self.state.borrow().clone()
  }

  /// Receiver notified on every connect/disconnect transition.
  pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
    self.state.subscribe()
  }

  fn active_adapter(&self) -> Option<&dyn WalletAdapter> {
    self.active.map(|i| &*self.adapters[i])
  }

  // =========================================================================
  // Transitions
  // =========================================================================

  /// Connect to `wallet_id`, ending any previous session first.
  ///
  /// # Errors
  /// `UnknownWallet` (state untouched) or whatever the adapter's
  /// `connect` returns (state is then `Disconnected`).
  #[instrument(skip(self))]
  pub async fn connect(&mut self, wallet_id: &str) -> Result<ConnectResult, WalletError> {
    let target = *self
      .index
      .get(wallet_id)
      .ok_or_else(|| WalletError::UnknownWallet(wallet_id.to_string()))?;

    if self.active.is_some() {
      if let Err(e) = self.release_active().await {
        warn!(error = %e, "Previous wallet did not disconnect cleanly; continuing");
      }
    }

    let adapter = &mut self.adapters[target];
    let name = adapter.wallet_info().name.clone();
    info!(wallet = %name, "Connecting wallet");

    let result = adapter.connect().await?;

    self.active = Some(target);
    self.state.send_replace(ConnectionState::Connected {
      wallet_id: result.wallet.id.clone(),
      public_key: result.public_key.clone(),
    });

    info!(wallet = %name, public_key = %result.public_key, "Wallet session active");
    Ok(result)
  }

  /// End the active session. A no-op when nothing is connected.
  ///
  /// The connector always returns to `Disconnected`, even when the
  /// wallet's own disconnect fails; that failure is then returned.
  #[instrument(skip(self))]
  pub async fn disconnect(&mut self) -> Result<(), WalletError> {
    self.release_active().await
  }

  async fn release_active(&mut self) -> Result<(), WalletError> {
    let Some(i) = self.active.take() else {
      return Ok(());
    };

    let adapter = &mut self.adapters[i];
    let name = adapter.wallet_info().name.clone();
    info!(wallet = %name, "Disconnecting wallet");

    let outcome = adapter.disconnect().await;
    self.state.send_replace(ConnectionState::Disconnected);

    match &outcome {
      Ok(()) => info!(wallet = %name, "Wallet session ended"),
      Err(e) => warn!(wallet = %name, error = %e, "Wallet disconnect failed; session cleared"),
    }
    outcome
  }

  // =========================================================================
  // Signing
  // =========================================================================

  /// Sign an envelope with the active wallet on the configured network.
  ///
  /// # Errors
  /// `NoActiveWallet` without touching any adapter when disconnected;
  /// otherwise the adapter's error unchanged.
  pub async fn sign_transaction(&self, xdr: &str) -> Result<SignTransactionResult, WalletError> {
    self.sign_transaction_with(xdr, SignOptions::default()).await
  }

  /// Like [`sign_transaction`](Self::sign_transaction) with caller options.
  ///
  /// `network_passphrase` is always replaced by the connector's own.
  pub async fn sign_transaction_with(
    &self,
    xdr: &str,
    options: SignOptions,
  ) -> Result<SignTransactionResult, WalletError> {
    let adapter = self.active_adapter().ok_or(WalletError::NoActiveWallet)?;
    let options = self.scoped(options);

    info!(wallet = %adapter.wallet_info().name, network = %self.options.network, "Signing transaction");
    adapter.sign_transaction(xdr, Some(options)).await
  }

  /// Sign an authorization entry with the active wallet.
  pub async fn sign_auth_entry(&self, entry_xdr: &str) -> Result<SignTransactionResult, WalletError> {
    let adapter = self.active_adapter().ok_or(WalletError::NoActiveWallet)?;
    let options = self.scoped(SignOptions::default());

    info!(wallet = %adapter.wallet_info().name, network = %self.options.network, "Signing auth entry");
    adapter.sign_auth_entry(entry_xdr, Some(options)).await
  }

  fn scoped(&self, options: SignOptions) -> SignOptions {
    SignOptions {
      network_passphrase: Some(self.network_passphrase().to_string()),
      ..options
    }
  }
}
