//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the connector requires from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `WalletAdapter`: Normalized connect/sign/disconnect per wallet
//! - `WalletEnvironment` / `InjectedWallet`: Discovery of and calls into
//!   injected wallet globals

pub mod environment;
pub mod wallet_adapter;

pub use environment::{InjectedWallet, WalletEnvironment};
pub use wallet_adapter::{WalletAdapter, sign_auth_entry_as_transaction};
