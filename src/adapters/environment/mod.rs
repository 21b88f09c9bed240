//! Environment Adapters - Where Injected Wallets Come From
//!
//! Implementations of the `WalletEnvironment` port:
//! - `HeadlessEnvironment`: no wallets at all (non-browser targets)
//! - `StaticEnvironment`: globals registered explicitly by the host
//! - `SimulatedWallet`: a deterministic injected wallet for development

pub mod headless;
pub mod registry;
pub mod simulated;

pub use headless::HeadlessEnvironment;
pub use registry::StaticEnvironment;
pub use simulated::SimulatedWallet;
