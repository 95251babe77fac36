//! Ledger commands
//!
//! A command is one request to the ledger, as read from a replay script.

use super::holder::NationalId;
use super::transaction::AccountNumber;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single request to the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a holder and open their first account
    Register {
        national_id: NationalId,
        name: String,
        birth_date: NaiveDate,
        address: String,
    },

    /// Open another account for an existing holder
    OpenAccount { national_id: NationalId },

    /// Credit an account
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },

    /// Debit an account
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
}

impl Command {
    /// Short lowercase name, matching the script `op` column
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::OpenAccount { .. } => "open",
            Command::Deposit { .. } => "deposit",
            Command::Withdraw { .. } => "withdraw",
        }
    }
}
