//! Headless Environment - No Injected Wallets
//!
//! Probe for targets without a browser host (servers, CLIs, tests).
//! Every wallet reports as not installed.

use std::sync::Arc;

use crate::ports::environment::{InjectedWallet, WalletEnvironment};

/// Environment in which no wallet global is ever present.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

impl WalletEnvironment for HeadlessEnvironment {
  fn lookup(&self, _global: &str) -> Option<Arc<dyn InjectedWallet>> {
    None
  }
}
