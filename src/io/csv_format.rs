//! CSV format handling for replay scripts and account summaries
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScriptRow structure for deserialization
//! - Conversion from script rows to ledger commands
//! - Account summary serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Script Format
//!
//! ```text
//! op,national_id,account,amount,name,birth_date,address,timestamp
//! register,12345678900,,,Ana Lima,17/05/1990,"Rua A, 10",2024-01-15 09:00:00
//! deposit,,1,250.00,,,,2024-01-15 09:05:00
//! withdraw,,1,100,,,,
//! open,12345678900,,,,,,
//! ```

use crate::io::format::{parse_amount, parse_birth_date, round_cents};
use crate::types::{Account, AccountNumber, Command, NationalId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;

/// Timestamp format accepted in the `timestamp` column
pub const SCRIPT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV row structure for deserialization
///
/// Every column except `op` is optional; which ones are required depends
/// on the operation.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ScriptRow {
    pub op: String,
    pub national_id: Option<String>,
    pub account: Option<AccountNumber>,
    pub amount: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub timestamp: Option<String>,
}

/// A parsed script row: the command plus the time it should run at
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    /// When present, the replay clock is moved here before the command runs
    pub timestamp: Option<NaiveDateTime>,
    pub command: Command,
}

fn required<'a>(value: &'a Option<String>, column: &str, op: &str) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("{} requires the '{}' column", op, column)),
    }
}

/// Convert a ScriptRow to a ScriptEntry
///
/// This function:
/// - Parses the operation name (case insensitive)
/// - Checks that the columns the operation needs are present
/// - Parses national IDs, amounts, birth dates and timestamps
///
/// # Returns
///
/// * `Ok(ScriptEntry)` - Successfully converted row
/// * `Err(String)` - Message describing the conversion failure
pub fn convert_script_row(row: ScriptRow) -> Result<ScriptEntry, String> {
    let op = row.op.trim().to_lowercase();

    let timestamp = match row.timestamp.as_deref().map(str::trim) {
        Some(ts) if !ts.is_empty() => Some(
            NaiveDateTime::parse_from_str(ts, SCRIPT_TIMESTAMP_FORMAT)
                .map_err(|_| format!("Invalid timestamp '{}'", ts))?,
        ),
        _ => None,
    };

    let national_id = |row: &ScriptRow| -> Result<NationalId, String> {
        let raw = required(&row.national_id, "national_id", &op)?;
        NationalId::parse(raw).map_err(|e| e.to_string())
    };

    let account = |row: &ScriptRow| -> Result<AccountNumber, String> {
        row.account
            .ok_or_else(|| format!("{} requires the 'account' column", op))
    };

    let amount = |row: &ScriptRow| -> Result<Decimal, String> {
        let raw = required(&row.amount, "amount", &op)?;
        parse_amount(raw).map_err(|e| e.to_string())
    };

    let command = match op.as_str() {
        "register" => Command::Register {
            national_id: national_id(&row)?,
            name: required(&row.name, "name", &op)?.to_string(),
            birth_date: parse_birth_date(required(&row.birth_date, "birth_date", &op)?)
                .map_err(|e| e.to_string())?,
            address: row
                .address
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        },
        "open" => Command::OpenAccount {
            national_id: national_id(&row)?,
        },
        "deposit" => Command::Deposit {
            account: account(&row)?,
            amount: amount(&row)?,
        },
        "withdraw" | "withdrawal" => Command::Withdraw {
            account: account(&row)?,
            amount: amount(&row)?,
        },
        _ => return Err(format!("Invalid operation: '{}'", row.op)),
    };

    Ok(ScriptEntry { timestamp, command })
}

/// Write account summaries in CSV format
///
/// Columns: agency, account, holder, balance, withdrawals_left,
/// transactions_today. Accounts are sorted by number for deterministic
/// output and balances are printed with two decimals.
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "agency",
        "account",
        "holder",
        "balance",
        "withdrawals_left",
        "transactions_today",
    ])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.number);

    for account in sorted_accounts {
        writer.write_record(&[
            account.agency.to_string(),
            account.number.to_string(),
            account.holder.to_string(),
            format!("{:.2}", round_cents(account.balance)),
            account.daily.withdrawals_left.to_string(),
            account.daily.transactions_today.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn row(op: &str) -> ScriptRow {
        ScriptRow {
            op: op.to_string(),
            ..ScriptRow::default()
        }
    }

    #[test]
    fn test_convert_register() {
        let entry = convert_script_row(ScriptRow {
            national_id: Some("123".to_string()),
            name: Some("Ana Lima".to_string()),
            birth_date: Some("17/05/1990".to_string()),
            address: Some("Rua A, 10".to_string()),
            timestamp: Some("2024-01-15 09:00:00".to_string()),
            ..row("register")
        })
        .unwrap();

        assert_eq!(
            entry.command,
            Command::Register {
                national_id: NationalId::parse("123").unwrap(),
                name: "Ana Lima".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                address: "Rua A, 10".to_string(),
            }
        );
        assert_eq!(
            entry.timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
        );
    }

    #[rstest]
    #[case::deposit("deposit", Command::Deposit { account: 1, amount: dec!(10.5) })]
    #[case::withdraw("withdraw", Command::Withdraw { account: 1, amount: dec!(10.5) })]
    #[case::withdrawal_alias("Withdrawal", Command::Withdraw { account: 1, amount: dec!(10.5) })]
    #[case::uppercase("DEPOSIT", Command::Deposit { account: 1, amount: dec!(10.5) })]
    fn test_convert_money_operations(#[case] op: &str, #[case] expected: Command) {
        let entry = convert_script_row(ScriptRow {
            account: Some(1),
            amount: Some("10.5".to_string()),
            ..row(op)
        })
        .unwrap();

        assert_eq!(entry.command, expected);
        assert_eq!(entry.timestamp, None);
    }

    #[test]
    fn test_convert_open() {
        let entry = convert_script_row(ScriptRow {
            national_id: Some("42".to_string()),
            ..row("open")
        })
        .unwrap();
        assert_eq!(
            entry.command,
            Command::OpenAccount {
                national_id: NationalId::parse("42").unwrap()
            }
        );
    }

    #[rstest]
    #[case::unknown_op(row("transfer"), "Invalid operation")]
    #[case::missing_account(ScriptRow { amount: Some("1".into()), ..row("deposit") }, "requires the 'account'")]
    #[case::missing_amount(ScriptRow { account: Some(1), ..row("withdraw") }, "requires the 'amount'")]
    #[case::bad_amount(ScriptRow { account: Some(1), amount: Some("abc".into()), ..row("deposit") }, "invalid amount")]
    #[case::bad_national_id(ScriptRow { national_id: Some("12-3".into()), ..row("open") }, "Invalid national ID")]
    #[case::bad_birth_date(
        ScriptRow {
            national_id: Some("1".into()),
            name: Some("A".into()),
            birth_date: Some("1990-05-17".into()),
            ..row("register")
        },
        "Invalid birth date"
    )]
    #[case::bad_timestamp(
        ScriptRow { account: Some(1), amount: Some("1".into()), timestamp: Some("15/01/2024".into()), ..row("deposit") },
        "Invalid timestamp"
    )]
    fn test_convert_errors(#[case] input: ScriptRow, #[case] expected_fragment: &str) {
        let error = convert_script_row(input).unwrap_err();
        assert!(
            error.contains(expected_fragment),
            "'{}' should contain '{}'",
            error,
            expected_fragment
        );
    }

    #[test]
    fn test_write_accounts_csv_sorts_and_rounds() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut second = Account::new(2, NationalId::parse("20").unwrap(), "B", today, 3);
        second.balance = dec!(12.505);
        second.daily.withdrawals_left = 1;
        second.daily.transactions_today = 4;
        let first = Account::new(1, NationalId::parse("10").unwrap(), "A", today, 3);

        let mut output = Vec::new();
        write_accounts_csv(&[&second, &first], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "agency,account,holder,balance,withdrawals_left,transactions_today\n\
             0001,1,10,0.00,3,0\n\
             0001,2,20,12.51,1,4\n"
        );
    }
}
