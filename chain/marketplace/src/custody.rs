//! EscrowCustodian — uniform take/release over the three asset kinds
//!
//! The custodian owns no state beyond the engine's custody account: every
//! call passes through to an external ledger. Custody is pooled, one shared
//! engine balance per asset kind; the per-order bookkeeping lives in the
//! registry, not here.

use rust_decimal::Decimal;
use types::asset::{NftRef, PayAsset};
use types::ids::AccountId;

use crate::errors::MarketError;
use crate::ledger::{Ledgers, NftRegistry};

/// Moves one unit of value of a declared kind between two identities, or
/// into/out of engine-held custody, reporting success or failure uniformly.
#[derive(Debug, Clone)]
pub struct EscrowCustodian {
    account: AccountId,
}

impl EscrowCustodian {
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }

    /// The engine's custody account
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Take custody of `nft` from `owner`.
    ///
    /// Requires `owner` to currently hold the item.
    pub fn take_non_fungible(
        &self,
        nfts: &mut dyn NftRegistry,
        owner: &AccountId,
        nft: &NftRef,
    ) -> Result<(), MarketError> {
        match nfts.owner_of(nft) {
            Some(current) if current == *owner => {}
            _ => {
                return Err(MarketError::NotAssetOwner {
                    nft: nft.clone(),
                    claimed_by: *owner,
                })
            }
        }
        nfts.transfer(owner, &self.account, nft)?;
        Ok(())
    }

    /// Release an engine-held item to `to`.
    ///
    /// The caller guarantees the engine currently holds it; a failure here
    /// aborts the enclosing operation.
    pub fn release_non_fungible(
        &self,
        nfts: &mut dyn NftRegistry,
        nft: &NftRef,
        to: &AccountId,
    ) -> Result<(), MarketError> {
        nfts.transfer(&self.account, to, nft)?;
        Ok(())
    }

    /// Take `price` units of `pay_asset` from `payer` into the pool.
    ///
    /// Native: the accompanying `attached` amount must cover `price`, and
    /// the FULL attached amount enters the pool; excess is retained, not
    /// refunded. Token: an allowance-backed pull of exactly `price`.
    pub fn take_payment(
        &self,
        ledgers: &mut Ledgers<'_>,
        payer: &AccountId,
        pay_asset: &PayAsset,
        price: Decimal,
        attached: Decimal,
    ) -> Result<(), MarketError> {
        match pay_asset {
            PayAsset::Native => {
                if attached < price {
                    return Err(MarketError::InsufficientPayment {
                        required: price,
                        attached,
                    });
                }
                ledgers.bank.send(payer, &self.account, attached)?;
            }
            PayAsset::Token(symbol) => {
                ledgers
                    .tokens
                    .transfer_from(&self.account, payer, &self.account, symbol, price)?;
            }
        }
        Ok(())
    }

    /// Release `amount` of `pay_asset` from the pool to `to`.
    ///
    /// A failed push aborts the enclosing operation; no partial state may
    /// remain committed.
    pub fn release_payment(
        &self,
        ledgers: &mut Ledgers<'_>,
        pay_asset: &PayAsset,
        amount: Decimal,
        to: &AccountId,
    ) -> Result<(), MarketError> {
        match pay_asset {
            PayAsset::Native => ledgers.bank.send(&self.account, to, amount)?,
            PayAsset::Token(symbol) => {
                ledgers.tokens.transfer(&self.account, to, symbol, amount)?
            }
        }
        Ok(())
    }

    /// Pass a payment straight through from `payer` to `to` without
    /// escrowing it (the fulfillSell path).
    ///
    /// Native: the attached amount lands in the pool and `price` is pushed
    /// on to `to`; the excess stays in the pool. If the push to `to` fails,
    /// the attached amount is returned to `payer` and the operation aborts.
    /// Token: a single allowance-backed pull payer -> `to`.
    pub fn forward_payment(
        &self,
        ledgers: &mut Ledgers<'_>,
        payer: &AccountId,
        pay_asset: &PayAsset,
        price: Decimal,
        attached: Decimal,
        to: &AccountId,
    ) -> Result<(), MarketError> {
        match pay_asset {
            PayAsset::Native => {
                if attached < price {
                    return Err(MarketError::InsufficientPayment {
                        required: price,
                        attached,
                    });
                }
                ledgers.bank.send(payer, &self.account, attached)?;
                if let Err(e) = ledgers.bank.send(&self.account, to, price) {
                    // Unwind the inbound leg so the aborted operation
                    // leaves no partial movement
                    ledgers.bank.send(&self.account, payer, attached)?;
                    return Err(e.into());
                }
            }
            PayAsset::Token(symbol) => {
                ledgers
                    .tokens
                    .transfer_from(&self.account, payer, to, symbol, price)?;
            }
        }
        Ok(())
    }
}
