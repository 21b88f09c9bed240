//! Bound Wallet Adapter - Binding-driven `WalletAdapter`
//!
//! One engine for every supported wallet. The `WalletBinding` says which
//! global to look up, which methods to call and where the answers live;
//! this adapter turns that into the uniform `WalletAdapter` contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::binding::{ALBEDO, FREIGHTER, RABET, ResponseField, WalletBinding, XBULL};
use crate::domain::error::{WalletCallError, WalletError};
use crate::domain::wallet::{ConnectResult, PublicKey, SignOptions, SignTransactionResult, WalletInfo};
use crate::ports::environment::{InjectedWallet, WalletEnvironment};
use crate::ports::wallet_adapter::{WalletAdapter, sign_auth_entry_as_transaction};

/// `WalletAdapter` for any wallet described by a `WalletBinding`.
pub struct BoundWalletAdapter {
  binding: WalletBinding,
  info: WalletInfo,
  env: Arc<dyn WalletEnvironment>,
  /// Session key; the only mutable state.
  session: Option<PublicKey>,
}

impl BoundWalletAdapter {
  /// Create an adapter, snapshotting installation from `env`.
  pub fn new(binding: WalletBinding, env: Arc<dyn WalletEnvironment>) -> Self {
    let installed = env.is_present(binding.global);
    Self {
      info: binding.wallet_info(installed),
      binding,
      env,
      session: None,
    }
  }

  pub fn freighter(env: Arc<dyn WalletEnvironment>) -> Self {
    Self::new(FREIGHTER, env)
  }

  pub fn xbull(env: Arc<dyn WalletEnvironment>) -> Self {
    Self::new(XBULL, env)
  }

  pub fn albedo(env: Arc<dyn WalletEnvironment>) -> Self {
    Self::new(ALBEDO, env)
  }

  pub fn rabet(env: Arc<dyn WalletEnvironment>) -> Self {
    Self::new(RABET, env)
  }

  /// The binding driving this adapter.
  pub fn binding(&self) -> &WalletBinding {
    &self.binding
  }

  /// Resolve the injected object or fail with `NotInstalled`.
  fn injected(&self) -> Result<Arc<dyn InjectedWallet>, WalletError> {
    self
      .env
      .lookup(self.binding.global)
      .ok_or_else(|| WalletError::NotInstalled {
        wallet: self.binding.name.to_string(),
        website: self.binding.website.to_string(),
      })
  }

  fn read_field(&self, method: &str, field: ResponseField, response: &Value) -> Result<String, WalletError> {
    field.extract(response).ok_or_else(|| WalletError::MalformedResponse {
      wallet: self.binding.name.to_string(),
      method: method.to_string(),
      expected: field.describe(),
    })
  }
}

#[async_trait]
impl WalletAdapter for BoundWalletAdapter {
  fn wallet_info(&self) -> &WalletInfo {
    &self.info
  }

  fn is_installed(&self) -> bool {
    self.env.is_present(self.binding.global)
  }

  async fn connect(&mut self) -> Result<ConnectResult, WalletError> {
    let wallet = self.injected()?;
    let method = self.binding.connect.method;

    debug!(wallet = %self.binding.name, method, "Requesting wallet access");
    let response = wallet.call(method, Vec::new()).await.map_err(|source| {
      warn!(wallet = %self.binding.name, error = %source, "Wallet rejected connection");
      WalletError::Connection {
        wallet: self.binding.name.to_string(),
        source,
      }
    })?;

    let public_key = self.read_field(method, self.binding.connect.key, &response)?;
    self.session = Some(public_key.clone());

    info!(wallet = %self.binding.name, public_key = %public_key, "Wallet connected");

    Ok(ConnectResult {
      public_key,
      wallet: self.info.clone(),
    })
  }

  async fn disconnect(&mut self) -> Result<(), WalletError> {
    if self.session.is_none() {
      return Ok(());
    }

    let outcome: Result<(), WalletCallError> = match (self.binding.disconnect, self.env.lookup(self.binding.global)) {
      (Some(method), Some(wallet)) if wallet.has_method(method) => {
        debug!(wallet = %self.binding.name, method, "Calling native disconnect");
        wallet.call(method, Vec::new()).await.map(|_| ())
      }
      _ => Ok(()),
    };

    self.session = None;

    match outcome {
      Ok(()) => {
        info!(wallet = %self.binding.name, "Wallet disconnected");
        Ok(())
      }
      Err(source) => {
        warn!(wallet = %self.binding.name, error = %source, "Native disconnect failed; session cleared");
        Err(WalletError::Disconnect {
          wallet: self.binding.name.to_string(),
          source,
        })
      }
    }
  }

  async fn sign_transaction(
    &self,
    xdr: &str,
    options: Option<SignOptions>,
  ) -> Result<SignTransactionResult, WalletError> {
    let wallet = self.injected()?;

    if self.binding.requires_session_for_signing && self.session.is_none() {
      return Err(WalletError::NotConnected {
        wallet: self.binding.name.to_string(),
      });
    }

    let sign = self.binding.sign;
    let args = sign
      .args
      .build(xdr, options.as_ref(), self.session.as_deref());

    debug!(wallet = %self.binding.name, method = sign.method, "Requesting signature");
    let response = wallet.call(sign.method, args).await.map_err(|source| {
      warn!(wallet = %self.binding.name, error = %source, "Wallet failed to sign");
      WalletError::Signing {
        wallet: self.binding.name.to_string(),
        source,
      }
    })?;

    let signed_xdr = self.read_field(sign.method, sign.signed, &response)?;
    let signer_address = self
      .session
      .clone()
      .or_else(|| options.and_then(|o| o.account_to_sign));

    Ok(SignTransactionResult {
      signed_xdr,
      signer_address,
    })
  }

  async fn sign_auth_entry(
    &self,
    entry_xdr: &str,
    options: Option<SignOptions>,
  ) -> Result<SignTransactionResult, WalletError> {
    sign_auth_entry_as_transaction(self, entry_xdr, options).await
  }

  fn public_key(&self) -> Option<PublicKey> {
    self.session.clone()
  }

  fn is_connected(&self) -> bool {
    self.session.is_some()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::adapters::environment::{HeadlessEnvironment, SimulatedWallet, StaticEnvironment};
  use crate::domain::network::TESTNET_PASSPHRASE;

  const KEY: &str = "GDTST7THQPE6UYYBXVFHX5FDHZNGV3CAXFNQG6NHGBQB3QBHYQEKMFOG";

  fn env_with(binding: &WalletBinding, wallet: SimulatedWallet) -> Arc<StaticEnvironment> {
    Arc::new(StaticEnvironment::new().with_global(binding.global, Arc::new(wallet)))
  }

  #[test]
  fn test_headless_reports_not_installed() {
    let adapter = BoundWalletAdapter::freighter(Arc::new(HeadlessEnvironment));
    assert!(!adapter.is_installed());
    assert!(!adapter.wallet_info().installed);
    assert_eq!(adapter.wallet_info().id, "freighter");
    assert_eq!(adapter.wallet_info().website, "https://freighter.app");
  }

  #[tokio::test]
  async fn test_connect_not_installed() {
    let mut adapter = BoundWalletAdapter::albedo(Arc::new(HeadlessEnvironment));
    let err = adapter.connect().await.unwrap_err();
    assert_eq!(
      err,
      WalletError::NotInstalled {
        wallet: "Albedo".to_string(),
        website: "https://albedo.link".to_string(),
      }
    );
    assert!(!adapter.is_connected());
  }

  #[tokio::test]
  async fn test_connect_each_builtin_normalizes_key() {
    for binding in [FREIGHTER, XBULL, ALBEDO, RABET] {
      let env = env_with(&binding, SimulatedWallet::new(binding, KEY, "secret"));
      let mut adapter = BoundWalletAdapter::new(binding, env);
      assert!(adapter.wallet_info().installed);

      let result = adapter.connect().await.unwrap();
      assert_eq!(result.public_key, KEY, "{}", binding.id);
      assert_eq!(result.wallet.id, binding.id);
      assert_eq!(adapter.public_key().as_deref(), Some(KEY));
      assert!(adapter.is_connected());
    }
  }

  #[tokio::test]
  async fn test_connection_rejection_keeps_message() {
    let wallet = SimulatedWallet::new(FREIGHTER, KEY, "secret").rejecting_connect("User denied access");
    let mut adapter = BoundWalletAdapter::freighter(env_with(&FREIGHTER, wallet));

    let err = adapter.connect().await.unwrap_err();
    assert!(err.to_string().contains("User denied access"));
    assert!(matches!(err, WalletError::Connection { .. }));
    assert!(!adapter.is_connected());
  }

  #[tokio::test]
  async fn test_freighter_requires_session_to_sign() {
    let wallet = Arc::new(SimulatedWallet::new(FREIGHTER, KEY, "secret"));
    let env = Arc::new(StaticEnvironment::new().with_global("freighter", wallet.clone()));
    let adapter = BoundWalletAdapter::freighter(env);

    let err = adapter.sign_transaction("XDR", None).await.unwrap_err();
    assert!(err.is_not_connected());
    assert!(wallet.calls().is_empty());
  }

  #[tokio::test]
  async fn test_freighter_forwards_options_verbatim() {
    let wallet = Arc::new(SimulatedWallet::new(FREIGHTER, KEY, "secret"));
    let env = Arc::new(StaticEnvironment::new().with_global("freighter", wallet.clone()));
    let mut adapter = BoundWalletAdapter::freighter(env);
    adapter.connect().await.unwrap();

    let opts = SignOptions::with_passphrase(TESTNET_PASSPHRASE).account(KEY);
    let result = adapter.sign_transaction("TEST_XDR", Some(opts)).await.unwrap();

    let (method, args) = wallet.calls().pop().unwrap();
    assert_eq!(method, "signTransaction");
    assert_eq!(
      args,
      vec![
        json!("TEST_XDR"),
        json!({ "networkPassphrase": TESTNET_PASSPHRASE, "accountToSign": KEY })
      ]
    );
    assert!(result.signed_xdr.starts_with("TEST_XDR."));
    assert_eq!(result.signer_address.as_deref(), Some(KEY));
  }

  #[tokio::test]
  async fn test_albedo_signs_without_session() {
    let env = env_with(&ALBEDO, SimulatedWallet::new(ALBEDO, KEY, "secret"));
    let adapter = BoundWalletAdapter::albedo(env);

    let result = adapter.sign_transaction("XDR", None).await.unwrap();
    assert!(result.signed_xdr.starts_with("XDR."));
    assert_eq!(result.signer_address, None);

    let overridden = adapter
      .sign_transaction("XDR", Some(SignOptions::default().account("GOTHER")))
      .await
      .unwrap();
    assert_eq!(overridden.signer_address.as_deref(), Some("GOTHER"));
  }

  #[tokio::test]
  async fn test_signing_failure_is_wrapped() {
    let wallet = SimulatedWallet::new(RABET, KEY, "secret").rejecting_sign("Signing failed");
    let mut adapter = BoundWalletAdapter::rabet(env_with(&RABET, wallet));
    adapter.connect().await.unwrap();

    let err = adapter.sign_transaction("XDR", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to sign transaction with Rabet: Signing failed");
  }

  #[tokio::test]
  async fn test_auth_entry_delegates_to_transaction_signing() {
    let wallet = Arc::new(SimulatedWallet::new(FREIGHTER, KEY, "secret"));
    let env = Arc::new(StaticEnvironment::new().with_global("freighter", wallet.clone()));
    let mut adapter = BoundWalletAdapter::freighter(env);
    adapter.connect().await.unwrap();

    let result = adapter.sign_auth_entry("AUTH_ENTRY_XDR", None).await.unwrap();
    let (method, args) = wallet.calls().pop().unwrap();
    assert_eq!(method, "signTransaction");
    assert_eq!(args, vec![json!("AUTH_ENTRY_XDR"), Value::Null]);
    assert!(result.signed_xdr.starts_with("AUTH_ENTRY_XDR."));
  }

  #[tokio::test]
  async fn test_disconnect_without_native_method_clears_session() {
    let wallet = Arc::new(SimulatedWallet::new(ALBEDO, KEY, "secret"));
    let env = Arc::new(StaticEnvironment::new().with_global("albedo", wallet.clone()));
    let mut adapter = BoundWalletAdapter::albedo(env);
    adapter.connect().await.unwrap();

    adapter.disconnect().await.unwrap();
    assert!(!adapter.is_connected());
    assert_eq!(adapter.public_key(), None);
    assert!(wallet.calls().iter().all(|(m, _)| m != "disconnect"));
  }

  #[tokio::test]
  async fn test_disconnect_failure_still_clears_session() {
    let wallet = SimulatedWallet::new(XBULL, KEY, "secret").rejecting_disconnect("extension crashed");
    let mut adapter = BoundWalletAdapter::xbull(env_with(&XBULL, wallet));
    adapter.connect().await.unwrap();

    let err = adapter.disconnect().await.unwrap_err();
    assert!(matches!(err, WalletError::Disconnect { .. }));
    assert!(!adapter.is_connected());
  }

  #[tokio::test]
  async fn test_disconnect_is_idempotent() {
    let mut adapter = BoundWalletAdapter::rabet(env_with(&RABET, SimulatedWallet::new(RABET, KEY, "s")));
    adapter.disconnect().await.unwrap();
    adapter.connect().await.unwrap();
    adapter.disconnect().await.unwrap();
    adapter.disconnect().await.unwrap();
    assert!(!adapter.is_connected());
  }

  #[tokio::test]
  async fn test_installed_is_snapshot_but_probe_is_live() {
    let env = Arc::new(StaticEnvironment::new());
    let adapter = BoundWalletAdapter::rabet(env.clone());
    assert!(!adapter.wallet_info().installed);

    env.insert("rabet", Arc::new(SimulatedWallet::new(RABET, KEY, "s")));
    assert!(adapter.is_installed());
    assert!(!adapter.wallet_info().installed);
  }

  #[tokio::test]
  async fn test_malformed_response_names_field() {
    let wallet = SimulatedWallet::new(RABET, KEY, "s").with_connect_response(json!({ "pubkey": KEY }));
    let mut adapter = BoundWalletAdapter::rabet(env_with(&RABET, wallet));

    let err = adapter.connect().await.unwrap_err();
    assert_eq!(
      err,
      WalletError::MalformedResponse {
        wallet: "Rabet".to_string(),
        method: "connect".to_string(),
        expected: "a non-empty string field \"address\"".to_string(),
      }
    );
    assert!(!adapter.is_connected());
  }
}
