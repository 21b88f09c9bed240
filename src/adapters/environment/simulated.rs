//! Simulated Wallet - Deterministic Development Wallet
//!
//! Answers the native call surface of any `WalletBinding` without a
//! browser. "Signing" appends an HMAC-SHA256 tag over the passphrase and
//! envelope, so the output is deterministic per secret but carries no
//! on-chain meaning. Every call is recorded for inspection.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use tracing::debug;

use crate::adapters::wallets::binding::WalletBinding;
use crate::domain::error::WalletCallError;
use crate::ports::environment::InjectedWallet;

/// Recorded call: method name and arguments.
pub type RecordedCall = (String, Vec<Value>);

/// Scripted stand-in for an injected wallet object.
pub struct SimulatedWallet {
  binding: WalletBinding,
  public_key: String,
  secret: String,
  connect_response: Option<Value>,
  reject_connect: Option<String>,
  reject_sign: Option<String>,
  reject_disconnect: Option<String>,
  calls: Mutex<Vec<RecordedCall>>,
}

impl SimulatedWallet {
  /// Wallet answering `binding`'s surface with a fixed key.
  pub fn new(binding: WalletBinding, public_key: impl Into<String>, secret: impl Into<String>) -> Self {
    Self {
      binding,
      public_key: public_key.into(),
      secret: secret.into(),
      connect_response: None,
      reject_connect: None,
      reject_sign: None,
      reject_disconnect: None,
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Reject every connect request with `message`.
  pub fn rejecting_connect(mut self, message: impl Into<String>) -> Self {
    self.reject_connect = Some(message.into());
    self
  }

  /// Reject every signing request with `message`.
  pub fn rejecting_sign(mut self, message: impl Into<String>) -> Self {
    self.reject_sign = Some(message.into());
    self
  }

  /// Fail the native disconnect with `message`.
  pub fn rejecting_disconnect(mut self, message: impl Into<String>) -> Self {
    self.reject_disconnect = Some(message.into());
    self
  }

  /// Answer connect with a raw response instead of the bound shape.
  pub fn with_connect_response(mut self, response: Value) -> Self {
    self.connect_response = Some(response);
    self
  }

  /// Key this wallet hands out.
  pub fn public_key(&self) -> &str {
    &self.public_key
  }

  /// Calls received so far, oldest first.
  pub fn calls(&self) -> Vec<RecordedCall> {
    self
      .calls
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Signed form of `envelope` for `passphrase`.
  pub fn signature_for(&self, envelope: &str, passphrase: Option<&str>) -> String {
    let message = format!("{}\n{}", passphrase.unwrap_or_default(), envelope);
    let mac = hmac_sha256::HMAC::mac(message.as_bytes(), self.secret.as_bytes());
    format!(
      "{}.{}",
      envelope,
      base64::engine::general_purpose::STANDARD.encode(mac)
    )
  }

  fn record(&self, method: &str, args: &[Value]) {
    self
      .calls
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push((method.to_string(), args.to_vec()));
  }
}

#[async_trait]
impl InjectedWallet for SimulatedWallet {
  fn has_method(&self, method: &str) -> bool {
    method == self.binding.connect.method
      || method == self.binding.sign.method
      || self.binding.disconnect == Some(method)
  }

  async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, WalletCallError> {
    self.record(method, &args);
    debug!(wallet = self.binding.id, method, "Simulated wallet call");

    if method == self.binding.connect.method {
      if let Some(message) = &self.reject_connect {
        return Err(WalletCallError::new(message.clone()));
      }
      return Ok(
        self
          .connect_response
          .clone()
          .unwrap_or_else(|| self.binding.connect.key.wrap(self.public_key.clone())),
      );
    }

    if method == self.binding.sign.method {
      if let Some(message) = &self.reject_sign {
        return Err(WalletCallError::new(message.clone()));
      }
      let shape = self.binding.sign.args;
      let envelope = shape
        .envelope(&args)
        .ok_or_else(|| WalletCallError::new("missing transaction envelope"))?;
      let signed = self.signature_for(envelope, shape.passphrase(&args));
      return Ok(self.binding.sign.signed.wrap(signed));
    }

    if self.binding.disconnect == Some(method) {
      return match &self.reject_disconnect {
        Some(message) => Err(WalletCallError::new(message.clone())),
        None => Ok(Value::Null),
      };
    }

    Err(WalletCallError::new(format!(
      "{} has no method {}",
      self.binding.name, method
    )))
  }
}
