//! Error types for the bank ledger
//!
//! Every ledger failure is a validation failure: the operation is rejected,
//! the account is left untouched and the message is shown to the caller.
//!
//! # Error Categories
//!
//! - **Rule Violations**: Invalid amounts, limits, insufficient funds
//! - **Lookup Errors**: Unknown account or holder, duplicate holder
//! - **Input Errors**: Malformed national ID or birth date, script parse errors
//! - **File I/O Errors**: Script not found, output write failures

use super::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Script file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    IoError { message: String },

    /// Script CSV parsing error
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError { line: Option<u64>, message: String },

    /// Amount is zero, negative or finer than a cent
    #[error("Invalid amount {amount}: amounts must be positive with at most two decimal places")]
    InvalidAmount { amount: Decimal },

    /// Withdrawal above the per-withdrawal limit
    #[error("Withdrawal of {requested} from account {account} exceeds the limit of {limit} per withdrawal")]
    WithdrawalAboveLimit {
        account: AccountNumber,
        requested: Decimal,
        limit: Decimal,
    },

    /// Withdrawal larger than the balance
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountNumber,
        balance: Decimal,
        requested: Decimal,
    },

    /// No withdrawals left for today
    #[error("Account {account} has used all {limit} withdrawals for today")]
    WithdrawalsExhausted { account: AccountNumber, limit: u32 },

    /// Daily transaction cap reached
    #[error("Account {account} reached the daily limit of {limit} transactions, try again tomorrow")]
    DailyTransactionLimit { account: AccountNumber, limit: u32 },

    /// Unknown account number
    #[error("Account {account} not found")]
    AccountNotFound { account: AccountNumber },

    /// Unknown national ID
    #[error("No holder registered with national ID {national_id}")]
    HolderNotFound { national_id: String },

    /// National ID already registered
    #[error("National ID {national_id} is already registered")]
    DuplicateHolder { national_id: String },

    /// National ID is empty or not digits only
    #[error("Invalid national ID '{value}': only digits are allowed")]
    InvalidNationalId { value: String },

    /// Birth date not in DD/MM/YYYY format
    #[error("Invalid birth date '{value}': expected DD/MM/YYYY")]
    InvalidBirthDate { value: String },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        operation: String,
        account: AccountNumber,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    pub fn withdrawal_above_limit(account: AccountNumber, requested: Decimal, limit: Decimal) -> Self {
        LedgerError::WithdrawalAboveLimit {
            account,
            requested,
            limit,
        }
    }

    pub fn insufficient_funds(account: AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    pub fn withdrawals_exhausted(account: AccountNumber, limit: u32) -> Self {
        LedgerError::WithdrawalsExhausted { account, limit }
    }

    pub fn daily_transaction_limit(account: AccountNumber, limit: u32) -> Self {
        LedgerError::DailyTransactionLimit { account, limit }
    }

    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    pub fn holder_not_found(national_id: &str) -> Self {
        LedgerError::HolderNotFound {
            national_id: national_id.to_string(),
        }
    }

    pub fn duplicate_holder(national_id: &str) -> Self {
        LedgerError::DuplicateHolder {
            national_id: national_id.to_string(),
        }
    }

    pub fn invalid_national_id(value: &str) -> Self {
        LedgerError::InvalidNationalId {
            value: value.to_string(),
        }
    }

    pub fn invalid_birth_date(value: &str) -> Self {
        LedgerError::InvalidBirthDate {
            value: value.to_string(),
        }
    }

    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// True for failures caused by a business rule rather than bad input or I/O
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::WithdrawalAboveLimit { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::WithdrawalsExhausted { .. }
                | LedgerError::DailyTransactionLimit { .. }
        )
    }
}
