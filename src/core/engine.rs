//! Ledger engine
//!
//! This module provides `Bank`, which coordinates the HolderRegistry, the
//! AccountManager and a Clock. It is the only entry point the front-ends
//! use.
//!
//! The bank enforces:
//! - Unique national IDs and automatic opening of a holder's first account
//! - The deposit and withdrawal rules of the AccountManager, with the
//!   current time taken from the clock
//! - All-or-nothing operations: a rejected request changes nothing

use crate::core::account_manager::AccountManager;
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::LedgerConfig;
use crate::core::holder_registry::HolderRegistry;
use crate::types::{
    Account, AccountHolder, AccountNumber, Command, LedgerError, NationalId, Statement,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// In-memory bank
///
/// Generic over the clock so that tests and script replay can control which
/// calendar day the daily caps refer to.
pub struct Bank<C: Clock = SystemClock> {
    accounts: AccountManager,
    holders: HolderRegistry,
    clock: C,
}

impl Bank<SystemClock> {
    /// Create an empty bank that reads the machine's local time
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Bank<SystemClock> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<C: Clock> Bank<C> {
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        Bank {
            accounts: AccountManager::new(config),
            holders: HolderRegistry::new(),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &LedgerConfig {
        self.accounts.config()
    }

    /// Process a single command
    ///
    /// Routes the command to the matching operation and discards its result
    /// value.
    pub fn process(&mut self, command: Command) -> Result<(), LedgerError> {
        match command {
            Command::Register {
                national_id,
                name,
                birth_date,
                address,
            } => self
                .register_holder(national_id, &name, birth_date, &address)
                .map(drop),
            Command::OpenAccount { national_id } => self.open_account(&national_id).map(drop),
            Command::Deposit { account, amount } => self.deposit(account, amount).map(drop),
            Command::Withdraw { account, amount } => self.withdraw(account, amount).map(drop),
        }
    }

    /// Register a new holder and open their first account
    ///
    /// # Returns
    ///
    /// The number of the holder's first account
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateHolder` if the national ID is already
    /// registered.
    pub fn register_holder(
        &mut self,
        national_id: NationalId,
        name: &str,
        birth_date: NaiveDate,
        address: &str,
    ) -> Result<AccountNumber, LedgerError> {
        if self.holders.contains(&national_id) {
            warn!(national_id = %national_id, "registration rejected: duplicate national ID");
            return Err(LedgerError::duplicate_holder(national_id.as_str()));
        }

        let number = self
            .accounts
            .open(national_id.clone(), name, self.clock.today());

        let mut holder = AccountHolder::new(national_id, name, birth_date, address);
        holder.accounts.push(number);
        info!(national_id = %holder.national_id, account = number, "holder registered");
        self.holders.insert(holder)?;

        Ok(number)
    }

    /// Log a holder in by national ID
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is malformed or not registered.
    pub fn login(&self, national_id: &str) -> Result<&AccountHolder, LedgerError> {
        let id = NationalId::parse(national_id)?;
        let holder = self
            .holders
            .get(&id)
            .ok_or_else(|| LedgerError::holder_not_found(id.as_str()))?;
        info!(national_id = %id, "holder logged in");
        Ok(holder)
    }

    /// Open another account for a registered holder
    pub fn open_account(&mut self, national_id: &NationalId) -> Result<AccountNumber, LedgerError> {
        let name = self
            .holders
            .get(national_id)
            .map(|holder| holder.name.clone())
            .ok_or_else(|| LedgerError::holder_not_found(national_id.as_str()))?;

        let number = self
            .accounts
            .open(national_id.clone(), &name, self.clock.today());
        self.holders.link_account(national_id, number)?;
        info!(national_id = %national_id, account = number, "account opened");

        Ok(number)
    }

    /// Deposit into an account
    ///
    /// # Returns
    ///
    /// The balance after the deposit
    pub fn deposit(&mut self, account: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        let now = self.clock.now();
        match self.accounts.deposit(account, amount, now) {
            Ok(balance) => {
                info!(account, %amount, %balance, "deposit applied");
                Ok(balance)
            }
            Err(e) => {
                warn!(account, %amount, error = %e, "deposit rejected");
                Err(e)
            }
        }
    }

    /// Withdraw from an account
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal
    pub fn withdraw(&mut self, account: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        let now = self.clock.now();
        match self.accounts.withdraw(account, amount, now) {
            Ok(balance) => {
                info!(account, %amount, %balance, "withdrawal applied");
                Ok(balance)
            }
            Err(e) => {
                warn!(account, %amount, error = %e, "withdrawal rejected");
                Err(e)
            }
        }
    }

    pub fn statement(&self, account: AccountNumber) -> Result<Statement<'_>, LedgerError> {
        self.accounts.statement(account)
    }

    /// Reset an account's daily counters if the clock moved to a new day
    pub fn reset_if_new_day(&mut self, account: AccountNumber) -> Result<bool, LedgerError> {
        let today = self.clock.today();
        self.accounts.reset_if_new_day(account, today)
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// All accounts sorted by number
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.get_all_accounts()
    }

    pub fn holder(&self, national_id: &NationalId) -> Option<&AccountHolder> {
        self.holders.get(national_id)
    }

    /// All holders ordered by national ID
    pub fn holders(&self) -> impl Iterator<Item = &AccountHolder> {
        self.holders.all()
    }

    /// A holder's accounts in opening order
    pub fn accounts_of(&self, national_id: &NationalId) -> Result<Vec<&Account>, LedgerError> {
        let holder = self
            .holders
            .get(national_id)
            .ok_or_else(|| LedgerError::holder_not_found(national_id.as_str()))?;

        Ok(holder
            .accounts
            .iter()
            .filter_map(|number| self.accounts.get(*number))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::types::TransactionKind;
    use chrono::{NaiveDateTime, TimeDelta};
    use rust_decimal_macros::dec;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn bank() -> Bank<ManualClock> {
        Bank::with_clock(LedgerConfig::default(), ManualClock::new(start()))
    }

    fn id(value: &str) -> NationalId {
        NationalId::parse(value).unwrap()
    }

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 6, 1).unwrap()
    }

    fn register(bank: &mut Bank<ManualClock>, national_id: &str, name: &str) -> AccountNumber {
        bank.register_holder(id(national_id), name, birth(), "Rua X, 1 - Centro - Natal/RN")
            .unwrap()
    }

    #[test]
    fn test_register_opens_first_account() {
        let mut bank = bank();

        let number = register(&mut bank, "111", "Ana Lima");

        assert_eq!(number, 1);
        let holder = bank.holder(&id("111")).unwrap();
        assert_eq!(holder.accounts, vec![1]);
        let account = bank.account(1).unwrap();
        assert_eq!(account.holder, id("111"));
        assert_eq!(account.holder_name, "Ana Lima");
        assert_eq!(account.daily.last_reset, start().date());
    }

    #[test]
    fn test_register_duplicate_is_rejected_without_opening_account() {
        let mut bank = bank();
        register(&mut bank, "111", "Ana Lima");

        let result = bank.register_holder(id("111"), "Other", birth(), "Elsewhere");

        assert_eq!(result, Err(LedgerError::duplicate_holder("111")));
        assert_eq!(bank.accounts().len(), 1);
    }

    #[test]
    fn test_login() {
        let mut bank = bank();
        register(&mut bank, "111", "Ana Lima");

        assert_eq!(bank.login(" 111 ").unwrap().name, "Ana Lima");
        assert_eq!(
            bank.login("222").unwrap_err(),
            LedgerError::holder_not_found("222")
        );
        assert!(matches!(
            bank.login("12a"),
            Err(LedgerError::InvalidNationalId { .. })
        ));
    }

    #[test]
    fn test_account_numbers_are_global_and_sequential() {
        let mut bank = bank();
        register(&mut bank, "111", "Ana");
        register(&mut bank, "222", "Bruno");

        let third = bank.open_account(&id("111")).unwrap();

        assert_eq!(third, 3);
        let numbers: Vec<_> = bank
            .accounts_of(&id("111"))
            .unwrap()
            .iter()
            .map(|a| a.number)
            .collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(
            bank.open_account(&id("999")),
            Err(LedgerError::holder_not_found("999"))
        );
    }

    #[test]
    fn test_deposit_and_withdraw_use_clock_time() {
        let mut bank = bank();
        let number = register(&mut bank, "111", "Ana");

        bank.deposit(number, dec!(200)).unwrap();
        bank.clock().advance(TimeDelta::minutes(5));
        let balance = bank.withdraw(number, dec!(75)).unwrap();

        assert_eq!(balance, dec!(125));
        let statement = bank.statement(number).unwrap();
        assert_eq!(statement.entries[0].timestamp, start());
        assert_eq!(statement.entries[1].timestamp, start() + TimeDelta::minutes(5));
        assert_eq!(statement.entries[1].kind, TransactionKind::Withdrawal);
    }

    #[test]
    fn test_daily_limits_reset_when_clock_crosses_midnight() {
        let mut bank = bank();
        let number = register(&mut bank, "111", "Ana");
        bank.deposit(number, dec!(1000)).unwrap();
        for _ in 0..3 {
            bank.withdraw(number, dec!(1)).unwrap();
        }
        assert!(matches!(
            bank.withdraw(number, dec!(1)),
            Err(LedgerError::WithdrawalsExhausted { .. })
        ));

        bank.clock().advance(TimeDelta::days(1));
        assert!(bank.reset_if_new_day(number).unwrap());
        assert_eq!(bank.account(number).unwrap().daily.withdrawals_left, 3);
        assert!(bank.withdraw(number, dec!(1)).is_ok());
    }

    #[test]
    fn test_process_routes_commands() {
        let mut bank = bank();

        bank.process(Command::Register {
            national_id: id("111"),
            name: "Ana".to_string(),
            birth_date: birth(),
            address: "Rua A".to_string(),
        })
        .unwrap();
        bank.process(Command::OpenAccount {
            national_id: id("111"),
        })
        .unwrap();
        bank.process(Command::Deposit {
            account: 2,
            amount: dec!(50),
        })
        .unwrap();
        bank.process(Command::Withdraw {
            account: 2,
            amount: dec!(20),
        })
        .unwrap();

        assert_eq!(bank.account(1).unwrap().balance, Decimal::ZERO);
        assert_eq!(bank.account(2).unwrap().balance, dec!(30));
        assert_eq!(
            bank.process(Command::Deposit {
                account: 9,
                amount: dec!(1)
            }),
            Err(LedgerError::account_not_found(9))
        );
    }

    #[test]
    fn test_holders_listing_is_ordered() {
        let mut bank = bank();
        register(&mut bank, "300", "Carla");
        register(&mut bank, "100", "Ana");

        let names: Vec<_> = bank.holders().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
    }
}
