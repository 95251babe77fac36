//! Account holder types
//!
//! A holder is identified by a digits-only national ID and owns one or more
//! accounts.

use super::error::LedgerError;
use super::transaction::AccountNumber;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// National identification number of a holder
///
/// Always non-empty and made only of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Validate and wrap a national ID
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidNationalId` if the value is empty or
    /// contains anything other than digits.
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(LedgerError::invalid_national_id(value));
        }
        Ok(NationalId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NationalId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NationalId::parse(s)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered account holder
#[derive(Debug, Clone, PartialEq)]
pub struct AccountHolder {
    /// Unique key of the holder
    pub national_id: NationalId,

    /// Full name
    pub name: String,

    /// Date of birth
    pub birth_date: NaiveDate,

    /// Free-form postal address
    pub address: String,

    /// Owned accounts in opening order
    pub accounts: Vec<AccountNumber>,
}

impl AccountHolder {
    pub fn new(
        national_id: NationalId,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: impl Into<String>,
    ) -> Self {
        AccountHolder {
            national_id,
            name: name.into(),
            birth_date,
            address: address.into(),
            accounts: Vec::new(),
        }
    }

    /// First word of the holder's name, used in greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
