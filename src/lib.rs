//! Bank Ledger Library
//! # Overview
//!
//! An in-memory bank simulation: holders register, log in, deposit,
//! withdraw and read statements. Nothing is persisted; everything runs on
//! one thread.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountHolder, TransactionRecord, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The `Bank`, entry point for every operation
//!   - [`core::account_manager`] - Account state and rule enforcement
//!   - [`core::holder_registry`] - Registered holders
//!   - [`core::clock`] - Source of the current date and time
//! - [`io`] - Formatting, script parsing and CSV summaries
//! - [`frontend`] - Interactive console and script replay
//! - [`observability`] - Logging setup
//!
//! # Rules
//!
//! - A withdrawal may not exceed 500 nor the balance
//! - Each account allows 3 withdrawals and 10 transactions per calendar day
//! - Counters reset when the current date differs from the last reset date
//! - The balance never goes negative; rejected operations change nothing

// Module declarations
pub mod cli;
pub mod core;
pub mod frontend;
pub mod io;
pub mod observability;
pub mod types;

pub use crate::core::{Bank, Clock, LedgerConfig, ManualClock, SystemClock};
pub use crate::io::write_accounts_csv;
pub use crate::types::{
    Account, AccountHolder, AccountNumber, Command, LedgerError, NationalId, Statement,
    TransactionKind, TransactionRecord,
};
