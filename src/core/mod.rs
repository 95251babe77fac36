//! Core business logic module
//!
//! This module contains the ledger components:
//! - `clock` - Source of the current date and time
//! - `config` - Rule limits
//! - `engine` - The `Bank`, coordinating everything below
//! - `account_manager` - Account state and rule enforcement
//! - `holder_registry` - Registered holders keyed by national ID

pub mod account_manager;
pub mod clock;
pub mod config;
pub mod engine;
pub mod holder_registry;

pub use account_manager::AccountManager;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use engine::Bank;
pub use holder_registry::HolderRegistry;
