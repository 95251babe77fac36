//! Ledger rule limits

use rust_decimal::Decimal;
use tracing::warn;

/// Limits enforced on every account
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Largest amount a single withdrawal may move
    pub max_withdrawal_amount: Decimal,
    /// Withdrawals allowed per account per day
    pub daily_withdrawals: u32,
    /// Deposits plus withdrawals allowed per account per day
    pub daily_transactions: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_withdrawal_amount: Decimal::from(500),
            daily_withdrawals: 3,
            daily_transactions: 10,
        }
    }
}

impl LedgerConfig {
    /// Create a LedgerConfig with custom values
    ///
    /// Non-positive limits would lock every account, so they fall back to
    /// the defaults with a warning.
    pub fn new(
        max_withdrawal_amount: Decimal,
        daily_withdrawals: u32,
        daily_transactions: u32,
    ) -> Self {
        let default = Self::default();

        let max_withdrawal_amount = if max_withdrawal_amount <= Decimal::ZERO {
            warn!(
                "Invalid max_withdrawal_amount ({}), using default ({})",
                max_withdrawal_amount, default.max_withdrawal_amount
            );
            default.max_withdrawal_amount
        } else {
            max_withdrawal_amount
        };

        let daily_withdrawals = if daily_withdrawals == 0 {
            warn!(
                "Invalid daily_withdrawals ({}), using default ({})",
                daily_withdrawals, default.daily_withdrawals
            );
            default.daily_withdrawals
        } else {
            daily_withdrawals
        };

        let daily_transactions = if daily_transactions == 0 {
            warn!(
                "Invalid daily_transactions ({}), using default ({})",
                daily_transactions, default.daily_transactions
            );
            default.daily_transactions
        } else {
            daily_transactions
        };

        Self {
            max_withdrawal_amount,
            daily_withdrawals,
            daily_transactions,
        }
    }
}
