//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` against the
//! outside world. Each sub-module groups adapters by concern.
//!
//! Adapter categories:
//! - `wallets`: The binding-driven wallet adapter and built-in bindings
//! - `environment`: Injected-wallet probes (headless, static, simulated)

pub mod environment;
pub mod wallets;
