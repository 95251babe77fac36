//! Holder registry
//!
//! This module provides the HolderRegistry component that keeps every
//! registered account holder, keyed by national ID. The registry backs the
//! register, login and listing operations and remembers which accounts each
//! holder owns.
//!
//! # Uniqueness
//!
//! A national ID can be registered only once. A second registration with
//! the same ID is rejected and the first holder is left untouched.

use crate::types::{AccountHolder, AccountNumber, LedgerError, NationalId};
use std::collections::BTreeMap;

/// Registry of account holders
///
/// Holders are kept ordered by national ID for deterministic listings.
pub struct HolderRegistry {
    holders: BTreeMap<NationalId, AccountHolder>,
}

impl HolderRegistry {
    pub fn new() -> Self {
        HolderRegistry {
            holders: BTreeMap::new(),
        }
    }

    /// Store a new holder
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateHolder` if the national ID is taken.
    pub fn insert(&mut self, holder: AccountHolder) -> Result<(), LedgerError> {
        if self.holders.contains_key(&holder.national_id) {
            return Err(LedgerError::duplicate_holder(holder.national_id.as_str()));
        }
        self.holders.insert(holder.national_id.clone(), holder);
        Ok(())
    }

    pub fn contains(&self, national_id: &NationalId) -> bool {
        self.holders.contains_key(national_id)
    }

    /// Look up a holder by national ID
    pub fn get(&self, national_id: &NationalId) -> Option<&AccountHolder> {
        self.holders.get(national_id)
    }

    /// Record that a holder owns an account
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::HolderNotFound` if the holder is not registered.
    pub fn link_account(
        &mut self,
        national_id: &NationalId,
        account: AccountNumber,
    ) -> Result<(), LedgerError> {
        let holder = self
            .holders
            .get_mut(national_id)
            .ok_or_else(|| LedgerError::holder_not_found(national_id.as_str()))?;
        holder.accounts.push(account);
        Ok(())
    }

    /// All holders ordered by national ID
    pub fn all(&self) -> impl Iterator<Item = &AccountHolder> {
        self.holders.values()
    }
}

impl Default for HolderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
