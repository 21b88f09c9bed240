//! Environment Port - Injected Wallet Discovery
//!
//! Browser wallets announce themselves by injecting a global object into
//! the host page. This port abstracts that lookup so adapters can be
//! driven by a real host, a headless target, or a test double.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::WalletCallError;

/// One injected global wallet object.
///
/// Arguments and responses are dynamic JSON values: every wallet has its
/// own method names and payload shapes, and adapters translate them.
#[async_trait]
pub trait InjectedWallet: Send + Sync {
  /// Whether the object exposes `method` (for optional capabilities).
  fn has_method(&self, method: &str) -> bool;

  /// Invoke `method` with positional arguments.
  ///
  /// A rejected promise / thrown error on the wallet side is returned
  /// as `WalletCallError` carrying the wallet's message.
  async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, WalletCallError>;
}

/// Probe for injected wallet globals.
pub trait WalletEnvironment: Send + Sync {
  /// Resolve a global by name (e.g., "freighter"). `None` when absent.
  fn lookup(&self, global: &str) -> Option<Arc<dyn InjectedWallet>>;

  /// Whether a global is present. Never fails.
  fn is_present(&self, global: &str) -> bool {
    self.lookup(global).is_some()
  }
}
