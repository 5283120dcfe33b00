//! FeeTreasury — administrative fee surface
//!
//! A single designated administrator controls the collector address and the
//! stored fee rate, and may sweep the engine-held balance of a payment
//! asset to the collector. The rate is configuration only: no settlement
//! path consumes it.

use rust_decimal::Decimal;
use types::asset::PayAsset;
use types::ids::AccountId;

use crate::errors::MarketError;
use crate::ledger::Ledgers;

#[derive(Debug, Clone)]
pub struct FeeTreasury {
    admin: AccountId,
    collector: AccountId,
    fee_rate: Decimal,
}

impl FeeTreasury {
    /// Create a treasury; the administrator starts as its own collector.
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            collector: admin,
            fee_rate: Decimal::ZERO,
        }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn collector(&self) -> &AccountId {
        &self.collector
    }

    /// The stored fee rate. Inert: readable and settable, never applied to
    /// any settlement.
    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    fn require_admin(&self, caller: &AccountId) -> Result<(), MarketError> {
        if *caller != self.admin {
            return Err(MarketError::NotAuthorized { caller: *caller });
        }
        Ok(())
    }

    /// Hand the administrator role to a new principal. Admin-only.
    pub fn set_admin(&mut self, caller: &AccountId, new_admin: AccountId) -> Result<(), MarketError> {
        self.require_admin(caller)?;
        self.admin = new_admin;
        Ok(())
    }

    /// Change the collector address. Admin-only. Returns the previous one.
    pub fn set_collector(
        &mut self,
        caller: &AccountId,
        new_collector: AccountId,
    ) -> Result<AccountId, MarketError> {
        self.require_admin(caller)?;
        let previous = self.collector;
        self.collector = new_collector;
        Ok(previous)
    }

    /// Store a new fee rate. Admin-only. Returns the previous one.
    pub fn set_fee_rate(
        &mut self,
        caller: &AccountId,
        rate: Decimal,
    ) -> Result<Decimal, MarketError> {
        self.require_admin(caller)?;
        if rate < Decimal::ZERO {
            return Err(MarketError::InvalidOrderParameters {
                reason: "fee rate must be non-negative".to_string(),
            });
        }
        let previous = self.fee_rate;
        self.fee_rate = rate;
        Ok(previous)
    }

    /// Sweep the engine's entire current balance of `pay_asset` to the
    /// collector. Admin-only. Returns the amount swept; a zero balance is a
    /// no-op.
    ///
    /// Custody is pooled and not accounted per order: the sweep includes
    /// balances still escrowed for open Buy orders along with retained
    /// native overpayment residue.
    pub fn collect(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &AccountId,
        pay_asset: &PayAsset,
        engine: &AccountId,
    ) -> Result<Decimal, MarketError> {
        self.require_admin(caller)?;
        let held = match pay_asset {
            PayAsset::Native => ledgers.bank.balance_of(engine),
            PayAsset::Token(symbol) => ledgers.tokens.balance_of(engine, symbol),
        };
        if held > Decimal::ZERO {
            match pay_asset {
                PayAsset::Native => ledgers.bank.send(engine, &self.collector, held)?,
                PayAsset::Token(symbol) => {
                    ledgers.tokens.transfer(engine, &self.collector, symbol, held)?
                }
            }
        }
        Ok(held)
    }
}
