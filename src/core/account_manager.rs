//! Account management module
//!
//! This module provides the `AccountManager` struct which owns every account
//! and applies the ledger rules to them.
//!
//! The AccountManager is responsible for:
//! - Assigning sequential account numbers
//! - Resetting daily counters when the calendar day changes
//! - Enforcing the deposit and withdrawal rules
//! - Producing statements and sorted account listings

use crate::core::config::LedgerConfig;
use crate::types::{
    Account, AccountNumber, LedgerError, NationalId, Statement, TransactionKind,
    TransactionRecord,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Manages all accounts and their states
///
/// Accounts are kept in a map ordered by account number, so listings come
/// out in opening order without extra sorting.
pub struct AccountManager {
    /// Map of account numbers to account states
    accounts: BTreeMap<AccountNumber, Account>,

    /// Number handed to the next opened account
    next_number: AccountNumber,

    /// Limits applied to every account
    config: LedgerConfig,
}

impl AccountManager {
    /// Create a new AccountManager with no accounts
    pub fn new(config: LedgerConfig) -> Self {
        AccountManager {
            accounts: BTreeMap::new(),
            next_number: 1,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a new account for a holder
    ///
    /// The account gets the next sequential number, a zero balance and
    /// daily counters starting on `today`.
    ///
    /// # Returns
    ///
    /// The number of the new account
    pub fn open(
        &mut self,
        holder: NationalId,
        holder_name: &str,
        today: NaiveDate,
    ) -> AccountNumber {
        let number = self.next_number;
        self.next_number += 1;

        let account = Account::new(
            number,
            holder,
            holder_name,
            today,
            self.config.daily_withdrawals,
        );
        self.accounts.insert(number, account);
        number
    }

    pub fn get(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// Get all accounts sorted by account number
    pub fn get_all_accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    fn account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Reset the daily counters if `today` differs from the last reset date
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The counters were reset
    /// * `Ok(false)` - Same day, nothing changed
    /// * `Err(LedgerError)` - The account does not exist
    pub fn reset_if_new_day(
        &mut self,
        number: AccountNumber,
        today: NaiveDate,
    ) -> Result<bool, LedgerError> {
        let daily_withdrawals = self.config.daily_withdrawals;
        let account = self.account_mut(number)?;
        Ok(roll_daily_counters(account, today, daily_withdrawals))
    }

    /// Deposit funds into an account
    ///
    /// # Arguments
    ///
    /// * `number` - The account to credit
    /// * `amount` - The amount to deposit (must be positive)
    /// * `now` - Time of the operation, used for the record and daily reset
    ///
    /// # Returns
    ///
    /// The balance after the deposit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The daily transaction cap is reached
    /// - The amount is zero, negative or has more than two decimal places
    /// - The new balance would overflow
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> Result<Decimal, LedgerError> {
        let LedgerConfig {
            daily_withdrawals,
            daily_transactions,
            ..
        } = self.config;
        let account = self.account_mut(number)?;
        roll_daily_counters(account, now.date(), daily_withdrawals);

        if account.daily.transactions_today >= daily_transactions {
            return Err(LedgerError::daily_transaction_limit(
                number,
                daily_transactions,
            ));
        }

        if !is_valid_amount(amount) {
            return Err(LedgerError::invalid_amount(amount));
        }

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", number))?;

        account.balance = new_balance;
        account.daily.transactions_today += 1;
        account.history.push(TransactionRecord {
            kind: TransactionKind::Deposit,
            amount,
            timestamp: now,
        });

        Ok(new_balance)
    }

    /// Withdraw funds from an account
    ///
    /// Every check runs before any field is touched, so a rejected
    /// withdrawal leaves the account exactly as it was (apart from a daily
    /// counter reset when the day changed).
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The daily transaction cap is reached
    /// - The amount is zero, negative or has more than two decimal places
    /// - The amount exceeds the per-withdrawal limit
    /// - The amount exceeds the balance
    /// - No withdrawals are left for today
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> Result<Decimal, LedgerError> {
        let LedgerConfig {
            max_withdrawal_amount,
            daily_withdrawals,
            daily_transactions,
        } = self.config;
        let account = self.account_mut(number)?;
        roll_daily_counters(account, now.date(), daily_withdrawals);

        if account.daily.transactions_today >= daily_transactions {
            return Err(LedgerError::daily_transaction_limit(
                number,
                daily_transactions,
            ));
        }

        if !is_valid_amount(amount) {
            return Err(LedgerError::invalid_amount(amount));
        }

        if amount > max_withdrawal_amount {
            return Err(LedgerError::withdrawal_above_limit(
                number,
                amount,
                max_withdrawal_amount,
            ));
        }

        if amount > account.balance {
            return Err(LedgerError::insufficient_funds(
                number,
                account.balance,
                amount,
            ));
        }

        if account.daily.withdrawals_left == 0 {
            return Err(LedgerError::withdrawals_exhausted(number, daily_withdrawals));
        }

        // amount <= balance was checked above
        let new_balance = account.balance - amount;

        account.balance = new_balance;
        account.daily.withdrawals_left -= 1;
        account.daily.transactions_today += 1;
        account.history.push(TransactionRecord {
            kind: TransactionKind::Withdrawal,
            amount,
            timestamp: now,
        });

        Ok(new_balance)
    }

    /// Statement of an account: ordered history and current balance
    pub fn statement(&self, number: AccountNumber) -> Result<Statement<'_>, LedgerError> {
        let account = self
            .get(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        Ok(Statement {
            agency: account.agency,
            account: account.number,
            entries: &account.history,
            balance: account.balance,
        })
    }
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

/// Positive and no finer than a cent; trailing zeros such as `0.100` are fine
fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount.normalize().scale() <= 2
}

fn roll_daily_counters(account: &mut Account, today: NaiveDate, daily_withdrawals: u32) -> bool {
    if account.daily.last_reset == today {
        return false;
    }

    debug!(
        account = account.number,
        previous = %account.daily.last_reset,
        %today,
        "resetting daily counters"
    );
    account.daily.withdrawals_left = daily_withdrawals;
    account.daily.transactions_today = 0;
    account.daily.last_reset = today;
    true
}
