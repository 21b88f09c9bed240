//! Use Cases Layer - Application Workflows
//!
//! Orchestrates wallet adapters through the port interfaces.
//!
//! Use cases:
//! - `WalletConnector`: Adapter registry, single active session,
//!   network-scoped signing

pub mod connector;

pub use connector::{ConnectionState, ConnectorOptions, WalletConnector};
