//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and daily counters
//! - `command`: Requests read from replay scripts
//! - `holder`: Account holders and national IDs
//! - `transaction`: Transaction records, statements and identifiers
//! - `error`: Error types for the ledger

pub mod account;
pub mod command;
pub mod error;
pub mod holder;
pub mod transaction;

pub use account::{Account, DailyCounters, AGENCY};
pub use command::Command;
pub use error::LedgerError;
pub use holder::{AccountHolder, NationalId};
pub use transaction::{AccountNumber, Statement, TransactionKind, TransactionRecord};
