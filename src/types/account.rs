//! Account-related types for the bank ledger
//!
//! This module defines the Account structure and its per-day counters.

use super::holder::NationalId;
use super::transaction::{AccountNumber, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Branch code shared by every account
pub const AGENCY: &str = "0001";

/// Per-day counters tracked on each account
///
/// The counters refer to the calendar day stored in `last_reset`. When the
/// ledger sees a different date the counters start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCounters {
    /// Withdrawals still allowed today
    pub withdrawals_left: u32,

    /// Transactions (deposits and withdrawals) applied today
    pub transactions_today: u32,

    /// Day the counters were last reset
    pub last_reset: NaiveDate,
}

impl DailyCounters {
    pub fn new(today: NaiveDate, daily_withdrawals: u32) -> Self {
        DailyCounters {
            withdrawals_left: daily_withdrawals,
            transactions_today: 0,
            last_reset: today,
        }
    }
}

/// Bank account state
///
/// Holds the balance, the ordered transaction history and the daily
/// counters of one account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Branch code, always [`AGENCY`]
    pub agency: &'static str,

    /// Sequential account number
    pub number: AccountNumber,

    /// National ID of the owning holder
    pub holder: NationalId,

    /// Name of the owning holder, shown in the account menu header
    pub holder_name: String,

    /// Current balance
    ///
    /// Never negative: withdrawals above the balance are rejected before
    /// any state changes.
    pub balance: Decimal,

    /// Applied transactions, oldest first
    pub history: Vec<TransactionRecord>,

    /// Daily withdrawal and transaction counters
    pub daily: DailyCounters,
}

impl Account {
    /// Create a new account with a zero balance and fresh daily counters
    ///
    /// # Arguments
    ///
    /// * `number` - The account number assigned by the bank
    /// * `holder` - National ID of the owner
    /// * `holder_name` - Name of the owner
    /// * `today` - Day used as the first counter reset date
    /// * `daily_withdrawals` - Withdrawals allowed per day
    pub fn new(
        number: AccountNumber,
        holder: NationalId,
        holder_name: impl Into<String>,
        today: NaiveDate,
        daily_withdrawals: u32,
    ) -> Self {
        Account {
            agency: AGENCY,
            number,
            holder,
            holder_name: holder_name.into(),
            balance: Decimal::ZERO,
            history: Vec::new(),
            daily: DailyCounters::new(today, daily_withdrawals),
        }
    }
}
