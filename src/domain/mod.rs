//! Domain layer - Wallet models, networks and errors.
//!
//! Pure types shared by every adapter and the connector.
//! No I/O and no wallet calls here (hexagonal architecture inner ring).

pub mod error;
pub mod network;
pub mod wallet;

// Re-export core types for convenience
pub use error::{WalletCallError, WalletError};
pub use network::{MAINNET_PASSPHRASE, Network, TESTNET_PASSPHRASE};
pub use wallet::{ConnectResult, PublicKey, SignOptions, SignTransactionResult, WalletId, WalletInfo};
