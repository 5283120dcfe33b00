//! External ledger capabilities consumed by the engine
//!
//! The fungible-asset ledger, the non-fungible registry, and the native
//! bank are external collaborators. The engine consumes them only through
//! the minimal capabilities below; every primitive is atomic at the level
//! of a single call (a failed transfer moves nothing). In-memory reference
//! implementations live in [`crate::memory`].

use rust_decimal::Decimal;
use types::asset::NftRef;
use types::ids::AccountId;

use crate::errors::LedgerError;

/// Balance-tracked fungible asset ledger with transfer authorization.
pub trait FungibleLedger {
    /// Current balance of `asset` held by `account`
    fn balance_of(&self, account: &AccountId, asset: &str) -> Decimal;

    /// Move `amount` of `asset` from `from` to `to`.
    /// Atomic: fails without partial movement when the balance is short.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError>;

    /// Authorization-backed pull: `spender` moves `amount` from `owner` to
    /// `to`, consuming allowance. Atomic: fails without partial movement
    /// when the allowance or the balance is short.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError>;

    /// `owner` authorizes `spender` to pull up to `amount` of `asset`
    fn approve(&mut self, owner: &AccountId, spender: &AccountId, asset: &str, amount: Decimal);
}

/// Ownership registry for uniquely identified items.
pub trait NftRegistry {
    /// Current owner of `nft`, if it exists
    fn owner_of(&self, nft: &NftRef) -> Option<AccountId>;

    /// Move `nft` from `from` to `to`. Fails when `from` is not the owner.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        nft: &NftRef,
    ) -> Result<(), LedgerError>;
}

/// Native-currency transfer primitive.
pub trait NativeBank {
    /// Current native balance of `account`
    fn balance_of(&self, account: &AccountId) -> Decimal;

    /// Push `amount` from `from` to `to`. Fails on insufficient balance or
    /// when the recipient rejects the push.
    fn send(&mut self, from: &AccountId, to: &AccountId, amount: Decimal)
        -> Result<(), LedgerError>;
}

/// The three collaborators a lifecycle operation touches, bundled so every
/// operation takes a single ledger parameter.
pub struct Ledgers<'a> {
    pub nfts: &'a mut dyn NftRegistry,
    pub tokens: &'a mut dyn FungibleLedger,
    pub bank: &'a mut dyn NativeBank,
}
