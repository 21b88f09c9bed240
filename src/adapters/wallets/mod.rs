//! Wallet Adapters - Built-in Wallet Integrations
//!
//! Every supported wallet is a `BoundWalletAdapter` driven by a
//! `WalletBinding` table entry:
//! - Freighter (`window.freighter`)
//! - xBull (`window.xBullWalletConnect`)
//! - Albedo (`window.albedo`, web-redirect, no native disconnect)
//! - Rabet (`window.rabet`)

pub mod adapter;
pub mod binding;

use std::sync::Arc;

pub use adapter::BoundWalletAdapter;
pub use binding::{BUILTIN_BINDINGS, WalletBinding};

use crate::ports::environment::WalletEnvironment;
use crate::ports::wallet_adapter::WalletAdapter;

/// One adapter per built-in wallet, in default registration order.
pub fn default_adapters(env: Arc<dyn WalletEnvironment>) -> Vec<Box<dyn WalletAdapter>> {
  BUILTIN_BINDINGS
    .iter()
    .map(|binding| Box::new(BoundWalletAdapter::new(*binding, Arc::clone(&env))) as Box<dyn WalletAdapter>)
    .collect()
}
