//! Text formatting for money, dates and statements
//!
//! All user-facing renderings live here so the console and the script
//! runner print the same thing.

use crate::types::{LedgerError, Statement};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{self, Write};
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Round to cents, halves away from zero
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount as `R$ 1500.45`
pub fn format_money(amount: Decimal) -> String {
    format!("R$ {:.2}", round_cents(amount))
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a birth date written as DD/MM/YYYY
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::invalid_birth_date(input))
}

/// Parse a user-typed amount
///
/// Accepts either `.` or `,` as the decimal separator and an optional
/// leading `R$`. Sign is not checked here; the ledger rejects non-positive
/// amounts.
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let cleaned = input
        .trim()
        .trim_start_matches("R$")
        .trim()
        .replace(',', ".");

    Decimal::from_str(&cleaned)
        .map_err(|_| LedgerError::parse_error(None, format!("invalid amount '{}'", input.trim())))
}

/// Write a statement: one line per record, then the balance
pub fn write_statement(statement: &Statement<'_>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "========== STATEMENT {}/{} ==========",
        statement.agency, statement.account
    )?;

    if statement.is_empty() {
        writeln!(out, "No transactions yet.")?;
    } else {
        for record in statement.entries {
            writeln!(
                out,
                "{} - {}: {}",
                format_timestamp(record.timestamp),
                record.kind,
                format_money(record.amount)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Balance: {}", format_money(statement.balance))?;
    writeln!(out, "======================================")?;
    Ok(())
}
