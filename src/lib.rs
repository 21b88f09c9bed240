//! Stellar Wallet Connector — Library Root
//!
//! One connect/sign/disconnect contract over several incompatible
//! browser-extension wallets. Re-exports all modules for integration
//! tests and the headless binary.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;

pub use domain::{ConnectResult, Network, SignOptions, SignTransactionResult, WalletError, WalletInfo};
pub use ports::{InjectedWallet, WalletAdapter, WalletEnvironment};
pub use usecases::{ConnectionState, ConnectorOptions, WalletConnector};
