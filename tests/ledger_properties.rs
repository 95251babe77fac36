//! Property tests for the ledger rules
//!
//! Every case runs against a fresh bank on a manual clock pinned to a fixed
//! morning, so the daily caps are deterministic.

use bank_ledger::{AccountNumber, Bank, LedgerConfig, LedgerError, ManualClock, NationalId};
use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn fresh_bank() -> (Bank<ManualClock>, AccountNumber) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let mut bank = Bank::with_clock(LedgerConfig::default(), ManualClock::new(start));
    let account = bank
        .register_holder(
            NationalId::parse("12345678900").unwrap(),
            "Ana Lima",
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            "Rua A, 10",
        )
        .unwrap();
    (bank, account)
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn balance_of(bank: &Bank<ManualClock>, account: AccountNumber) -> Decimal {
    bank.account(account).unwrap().balance
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// A withdrawal larger than the balance fails and leaves it untouched.
    #[test]
    fn overdraft_is_rejected(balance in 1i64..100_000, excess in 1i64..100_000) {
        let (mut bank, account) = fresh_bank();
        bank.deposit(account, cents(balance)).unwrap();

        let result = bank.withdraw(account, cents(balance + excess));

        prop_assert!(result.is_err());
        prop_assert_eq!(balance_of(&bank, account), cents(balance));
        prop_assert_eq!(bank.account(account).unwrap().history.len(), 1);
    }

    /// A withdrawal above the per-withdrawal maximum fails even when covered.
    #[test]
    fn withdrawal_above_limit_is_rejected(amount in 50_001i64..10_000_000) {
        let (mut bank, account) = fresh_bank();
        bank.deposit(account, cents(10_000_000)).unwrap();

        let result = bank.withdraw(account, cents(amount));

        let is_limit_error = matches!(result, Err(LedgerError::WithdrawalAboveLimit { .. }));
        prop_assert!(is_limit_error);
        prop_assert_eq!(balance_of(&bank, account), cents(10_000_000));
    }

    /// After three withdrawals a fourth fails until the date moves on.
    #[test]
    fn fourth_withdrawal_waits_for_next_day(
        amounts in prop::collection::vec(1i64..10_000, 4),
    ) {
        let (mut bank, account) = fresh_bank();
        bank.deposit(account, cents(100_000)).unwrap();

        for amount in &amounts[..3] {
            prop_assert!(bank.withdraw(account, cents(*amount)).is_ok());
        }
        let before = balance_of(&bank, account);

        let exhausted = matches!(
            bank.withdraw(account, cents(amounts[3])),
            Err(LedgerError::WithdrawalsExhausted { .. })
        );
        prop_assert!(exhausted);
        prop_assert_eq!(balance_of(&bank, account), before);

        bank.clock().advance(TimeDelta::days(1));
        prop_assert!(bank.withdraw(account, cents(amounts[3])).is_ok());
        prop_assert_eq!(balance_of(&bank, account), before - cents(amounts[3]));
    }

    /// After ten transactions every operation fails until the date moves on.
    #[test]
    fn transaction_cap_blocks_everything_for_the_day(
        amounts in prop::collection::vec(1i64..100_000, 10),
        next_is_deposit in any::<bool>(),
    ) {
        let (mut bank, account) = fresh_bank();
        for amount in &amounts {
            prop_assert!(bank.deposit(account, cents(*amount)).is_ok());
        }
        let before = balance_of(&bank, account);

        let next = |bank: &mut Bank<ManualClock>| {
            if next_is_deposit {
                bank.deposit(account, cents(1))
            } else {
                bank.withdraw(account, cents(1))
            }
        };

        let capped = matches!(next(&mut bank), Err(LedgerError::DailyTransactionLimit { .. }));
        prop_assert!(capped);
        prop_assert_eq!(balance_of(&bank, account), before);

        bank.clock().advance(TimeDelta::days(1));
        prop_assert!(next(&mut bank).is_ok());
        prop_assert_eq!(bank.account(account).unwrap().daily.transactions_today, 1);
    }

    /// A positive deposit raises the balance by exactly the amount.
    #[test]
    fn deposit_adds_exact_amount(start in 0i64..1_000_000, amount in 1i64..1_000_000) {
        let (mut bank, account) = fresh_bank();
        if start > 0 {
            bank.deposit(account, cents(start)).unwrap();
        }

        let balance = bank.deposit(account, cents(amount)).unwrap();

        prop_assert_eq!(balance, cents(start) + cents(amount));
        prop_assert_eq!(balance_of(&bank, account), balance);
    }
}
