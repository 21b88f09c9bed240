//! Static Environment - Explicit Global Registry
//!
//! An environment whose injected globals are registered by the host
//! application (or a test). Globals can be added and removed at any
//! time; adapters see the change on their next call.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::ports::environment::{InjectedWallet, WalletEnvironment};

/// Name → injected object map.
#[derive(Default)]
pub struct StaticEnvironment {
  globals: RwLock<HashMap<String, Arc<dyn InjectedWallet>>>,
}

impl StaticEnvironment {
  /// Empty environment.
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style registration.
  pub fn with_global(self, global: impl Into<String>, wallet: Arc<dyn InjectedWallet>) -> Self {
    self.insert(global, wallet);
    self
  }

  /// Register (or replace) a global.
  pub fn insert(&self, global: impl Into<String>, wallet: Arc<dyn InjectedWallet>) {
    let global = global.into();
    debug!(global = %global, "Injected wallet registered");
    self
      .globals
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(global, wallet);
  }

  /// Remove a global. Returns whether it was present.
  pub fn remove(&self, global: &str) -> bool {
    self
      .globals
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .remove(global)
      .is_some()
  }

  /// Names of all registered globals, sorted.
  pub fn globals(&self) -> Vec<String> {
    let mut names: Vec<String> = self
      .globals
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .keys()
      .cloned()
      .collect();
    names.sort();
    names
  }
}

impl WalletEnvironment for StaticEnvironment {
  fn lookup(&self, global: &str) -> Option<Arc<dyn InjectedWallet>> {
    self
      .globals
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(global)
      .cloned()
  }
}
