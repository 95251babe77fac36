//! Transaction-related types for the bank ledger
//!
//! This module defines the transaction kinds, the records appended to an
//! account's history, and the statement view returned by the ledger.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Account number
///
/// Sequential across the whole bank, starting at 1.
pub type AccountNumber = u32;

/// Kinds of transaction an account can record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Bounded by the per-withdrawal limit, the balance and the daily
    /// withdrawal count.
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// A single entry in an account's history
///
/// Records are only appended for operations that were applied; rejected
/// operations leave no trace in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Deposit or withdrawal
    pub kind: TransactionKind,

    /// Strictly positive amount moved by the operation
    pub amount: Decimal,

    /// Local wall-clock time at which the operation was applied
    pub timestamp: NaiveDateTime,
}

/// Statement of an account: its history in order plus the current balance
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'a> {
    pub agency: &'static str,
    pub account: AccountNumber,
    pub entries: &'a [TransactionRecord],
    pub balance: Decimal,
}

impl Statement<'_> {
    /// True when the account has not recorded any transaction yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
