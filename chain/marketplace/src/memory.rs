//! In-memory reference ledgers
//!
//! Concrete implementations of the external ledger capabilities, used by
//! the test suites and local runs. Balances use checked arithmetic; the
//! bank can be told to refuse incoming pushes for a given account, which
//! models a recipient that rejects a native transfer.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use types::asset::NftRef;
use types::ids::AccountId;

use crate::errors::LedgerError;
use crate::ledger::{FungibleLedger, NativeBank, NftRegistry};

/// Fungible ledger: balances and allowances keyed by (account, asset).
#[derive(Debug, Default)]
pub struct MemoryToken {
    /// account -> (asset -> amount)
    balances: HashMap<AccountId, HashMap<String, Decimal>>,
    /// (owner, spender, asset) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId, String), Decimal>,
}

impl MemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` of `asset` to `account`
    pub fn mint(&mut self, account: &AccountId, asset: &str, amount: Decimal) {
        let balance = self
            .balances
            .entry(*account)
            .or_default()
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO);
        *balance += amount;
    }

    /// Remaining allowance granted by `owner` to `spender` for `asset`
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId, asset: &str) -> Decimal {
        self.allowances
            .get(&(*owner, *spender, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn debit(&mut self, account: &AccountId, asset: &str, amount: Decimal) -> Result<(), LedgerError> {
        let available = self
            .balances
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(Decimal::ZERO);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: asset.to_string(),
                required: amount.to_string(),
                available: available.to_string(),
            });
        }
        let balance = self
            .balances
            .entry(*account)
            .or_default()
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO);
        *balance = balance.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, asset: &str, amount: Decimal) -> Result<(), LedgerError> {
        let balance = self
            .balances
            .entry(*account)
            .or_default()
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

impl FungibleLedger for MemoryToken {
    fn balance_of(&self, account: &AccountId, asset: &str) -> Decimal {
        self.balances
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.debit(from, asset, amount)?;
        self.credit(to, asset, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let key = (*owner, *spender, asset.to_string());
        let allowed = self.allowances.get(&key).copied().unwrap_or(Decimal::ZERO);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                asset: asset.to_string(),
                owner: *owner,
                spender: *spender,
            });
        }
        self.transfer(owner, to, asset, amount)?;
        // Allowance is consumed only once the transfer has committed
        self.allowances.insert(key, allowed - amount);
        Ok(())
    }

    fn approve(&mut self, owner: &AccountId, spender: &AccountId, asset: &str, amount: Decimal) {
        self.allowances
            .insert((*owner, *spender, asset.to_string()), amount);
    }
}

/// Ownership registry: one current owner per item.
#[derive(Debug, Default)]
pub struct MemoryNfts {
    owners: HashMap<NftRef, AccountId>,
}

impl MemoryNfts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `nft` to `owner`
    pub fn mint(&mut self, owner: &AccountId, nft: NftRef) {
        self.owners.insert(nft, *owner);
    }
}

impl NftRegistry for MemoryNfts {
    fn owner_of(&self, nft: &NftRef) -> Option<AccountId> {
        self.owners.get(nft).copied()
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        nft: &NftRef,
    ) -> Result<(), LedgerError> {
        match self.owners.get(nft) {
            Some(current) if current == from => {
                self.owners.insert(nft.clone(), *to);
                Ok(())
            }
            _ => Err(LedgerError::NotOwner {
                nft: nft.clone(),
                claimed_by: *from,
            }),
        }
    }
}

/// Native-currency bank with a per-account refusal switch for tests.
#[derive(Debug, Default)]
pub struct MemoryBank {
    balances: HashMap<AccountId, Decimal>,
    refuse_incoming: HashSet<AccountId>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of native currency to `account`
    pub fn fund(&mut self, account: &AccountId, amount: Decimal) {
        *self.balances.entry(*account).or_insert(Decimal::ZERO) += amount;
    }

    /// Make `account` reject (or accept again) incoming pushes
    pub fn set_refuse_incoming(&mut self, account: &AccountId, refuse: bool) {
        if refuse {
            self.refuse_incoming.insert(*account);
        } else {
            self.refuse_incoming.remove(account);
        }
    }
}

impl NativeBank for MemoryBank {
    fn balance_of(&self, account: &AccountId) -> Decimal {
        self.balances.get(account).copied().unwrap_or(Decimal::ZERO)
    }

    fn send(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if self.refuse_incoming.contains(to) {
            return Err(LedgerError::TransferRejected { to: *to });
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: "NATIVE".to_string(),
                required: amount.to_string(),
                available: available.to_string(),
            });
        }
        let from_balance = self.balances.entry(*from).or_insert(Decimal::ZERO);
        *from_balance = from_balance.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        let to_balance = self.balances.entry(*to).or_insert(Decimal::ZERO);
        *to_balance = to_balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}
