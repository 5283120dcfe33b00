//! Marketplace — the order lifecycle state machine
//!
//! Orchestrates the registry, the custodian, and the treasury. Each
//! operation validates against registry state, performs custody movements
//! through the custodian, and commits the resulting order state back.
//! Operations execute serially and are all-or-nothing: a failed external
//! transfer unwinds everything the operation did.
//!
//! Custody is asymmetric. A `Sell` order escrows the item from creation to
//! release and passes the payment straight through at fulfillment; a `Buy`
//! order escrows the payment and moves the item directly at fulfillment.
//!
//! Ordering rule: `available` flips to `false` BEFORE any outbound release
//! call is issued, so a self-referential call observes the order as already
//! closed. The unwind path exists only to keep aborted operations free of
//! partial state.

use rust_decimal::Decimal;
use tracing::debug;
use types::asset::{NftRef, PayAsset};
use types::ids::{AccountId, OrderId};
use types::order::{Order, OrderKind};

use crate::custody::EscrowCustodian;
use crate::errors::MarketError;
use crate::events::{
    CollectorChanged, FeeRateChanged, FeesCollected, MarketEvent, OrderCancelled, OrderCreated,
    OrderFulfilled,
};
use crate::ledger::Ledgers;
use crate::registry::OrderRegistry;
use crate::treasury::FeeTreasury;

pub struct Marketplace {
    /// The engine's own custody account
    account: AccountId,
    registry: OrderRegistry,
    custodian: EscrowCustodian,
    treasury: FeeTreasury,
    /// Emitted events log (append-only)
    events: Vec<MarketEvent>,
}

impl Marketplace {
    /// Create a marketplace with a fresh custody account and the given
    /// administrator.
    pub fn new(admin: AccountId) -> Self {
        let account = AccountId::new();
        Self {
            account,
            registry: OrderRegistry::new(),
            custodian: EscrowCustodian::new(account),
            treasury: FeeTreasury::new(admin),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Creation ─────────────────────────

    /// Open a `Sell` order: the caller's item enters custody now, payment
    /// moves only at fulfillment. Returns the new order id.
    #[allow(clippy::too_many_arguments)]
    pub fn create_sell(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        nft: NftRef,
        pay_asset: PayAsset,
        price: Decimal,
        expires_at: i64,
        now: i64,
    ) -> Result<OrderId, MarketError> {
        // Ownership precondition first, then terms
        match ledgers.nfts.owner_of(&nft) {
            Some(owner) if owner == caller => {}
            _ => {
                return Err(MarketError::NotAssetOwner {
                    nft,
                    claimed_by: caller,
                })
            }
        }
        check_terms(price, expires_at, now)?;

        // Fallible custody leg before the registry commit, so a failed take
        // never burns an id
        self.custodian.take_non_fungible(ledgers.nfts, &caller, &nft)?;

        let id = self.registry.allocate();
        let order = Order::new(
            id,
            OrderKind::Sell,
            caller,
            nft,
            pay_asset,
            price,
            expires_at,
            now,
        );
        debug!(order_id = %id, proposer = %caller, "sell order created");
        self.events.push(MarketEvent::OrderCreated(OrderCreated {
            order_id: id,
            kind: order.kind,
            proposer: order.proposer,
            nft: order.nft.clone(),
            pay_asset: order.pay_asset.clone(),
            price: order.price,
            expires_at: order.expires_at,
        }));
        self.registry.store(order);
        Ok(id)
    }

    /// Open a `Buy` order: `price` units of the payment asset enter custody
    /// now. Ownership of the target item is deliberately NOT checked: a
    /// Buy order targets an item the proposer does not yet own. Returns the
    /// new order id.
    #[allow(clippy::too_many_arguments)]
    pub fn create_buy(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        nft: NftRef,
        pay_asset: PayAsset,
        price: Decimal,
        expires_at: i64,
        now: i64,
        attached: Decimal,
    ) -> Result<OrderId, MarketError> {
        check_terms(price, expires_at, now)?;
        check_attached(attached)?;

        self.custodian
            .take_payment(ledgers, &caller, &pay_asset, price, attached)?;

        let id = self.registry.allocate();
        let order = Order::new(
            id,
            OrderKind::Buy,
            caller,
            nft,
            pay_asset,
            price,
            expires_at,
            now,
        );
        debug!(order_id = %id, proposer = %caller, "buy order created");
        self.events.push(MarketEvent::OrderCreated(OrderCreated {
            order_id: id,
            kind: order.kind,
            proposer: order.proposer,
            nft: order.nft.clone(),
            pay_asset: order.pay_asset.clone(),
            price: order.price,
            expires_at: order.expires_at,
        }));
        self.registry.store(order);
        Ok(id)
    }

    // ───────────────────────── Cancellation ─────────────────────────

    /// Cancel an open order and return its escrow to the proposer.
    ///
    /// Checked in order: valid id, available, not expired, caller is the
    /// proposer. An order past its expiry cannot be cancelled either; its
    /// escrow is unreachable through the public interface.
    pub fn cancel(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        order_id: OrderId,
        now: i64,
    ) -> Result<(), MarketError> {
        let order = self.checked_order(order_id, now)?;
        if order.proposer != caller {
            return Err(MarketError::NotAuthorized { caller });
        }

        // Close before releasing anything
        self.registry.mark_unavailable(order_id);
        let released = match order.kind {
            OrderKind::Sell => {
                self.custodian
                    .release_non_fungible(ledgers.nfts, &order.nft, &order.proposer)
            }
            OrderKind::Buy => self.custodian.release_payment(
                ledgers,
                &order.pay_asset,
                order.price,
                &order.proposer,
            ),
        };
        if let Err(e) = released {
            // The external transfer failed: unwind the flag so the aborted
            // call commits nothing
            self.registry.mark_available(order_id);
            return Err(e);
        }

        debug!(order_id = %order_id, "order cancelled");
        self.events.push(MarketEvent::OrderCancelled(OrderCancelled {
            order_id,
            proposer: order.proposer,
        }));
        Ok(())
    }

    // ───────────────────────── Fulfillment ─────────────────────────

    /// Fulfill a `Sell` order: the caller pays the proposer directly (the
    /// payment is never escrowed) and receives the escrowed item.
    pub fn fulfill_sell(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        order_id: OrderId,
        now: i64,
        attached: Decimal,
    ) -> Result<(), MarketError> {
        let order = self.checked_order(order_id, now)?;
        if order.kind != OrderKind::Sell {
            return Err(MarketError::InvalidOrderParameters {
                reason: format!("order {} is not a sell order", order_id),
            });
        }
        if order.proposer == caller {
            return Err(MarketError::NotAuthorized { caller });
        }
        check_attached(attached)?;

        self.registry.mark_unavailable(order_id);
        if let Err(e) = self.custodian.forward_payment(
            ledgers,
            &caller,
            &order.pay_asset,
            order.price,
            attached,
            &order.proposer,
        ) {
            self.registry.mark_available(order_id);
            return Err(e);
        }
        // The engine holds the item for every open Sell order, so this
        // release cannot fail an ownership check
        self.custodian
            .release_non_fungible(ledgers.nfts, &order.nft, &caller)?;

        debug!(order_id = %order_id, fulfiller = %caller, "sell order fulfilled");
        self.events.push(MarketEvent::OrderFulfilled(OrderFulfilled {
            order_id,
            fulfiller: caller,
        }));
        Ok(())
    }

    /// Fulfill a `Buy` order: the caller's item moves directly to the
    /// proposer (ownership failure surfaces from the registry) and the
    /// escrowed payment is released to the caller.
    pub fn fulfill_buy(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        order_id: OrderId,
        now: i64,
    ) -> Result<(), MarketError> {
        let order = self.checked_order(order_id, now)?;
        if order.kind != OrderKind::Buy {
            return Err(MarketError::InvalidOrderParameters {
                reason: format!("order {} is not a buy order", order_id),
            });
        }
        if order.proposer == caller {
            return Err(MarketError::NotAuthorized { caller });
        }

        self.registry.mark_unavailable(order_id);
        // Item leg: direct caller -> proposer, never escrowed
        if let Err(e) = ledgers.nfts.transfer(&caller, &order.proposer, &order.nft) {
            self.registry.mark_available(order_id);
            return Err(e.into());
        }
        // Payment leg: escrowed pool -> caller
        if let Err(e) =
            self.custodian
                .release_payment(ledgers, &order.pay_asset, order.price, &caller)
        {
            // Unwind the item leg and the flag
            ledgers.nfts.transfer(&order.proposer, &caller, &order.nft)?;
            self.registry.mark_available(order_id);
            return Err(e);
        }

        debug!(order_id = %order_id, fulfiller = %caller, "buy order fulfilled");
        self.events.push(MarketEvent::OrderFulfilled(OrderFulfilled {
            order_id,
            fulfiller: caller,
        }));
        Ok(())
    }

    // ───────────────────────── Administration ─────────────────────────

    /// Sweep the engine-held balance of `pay_asset` to the collector.
    /// Admin-only. Returns the amount swept.
    pub fn collect(
        &mut self,
        ledgers: &mut Ledgers<'_>,
        caller: AccountId,
        pay_asset: PayAsset,
    ) -> Result<Decimal, MarketError> {
        let amount = self
            .treasury
            .collect(ledgers, &caller, &pay_asset, &self.account)?;
        debug!(%pay_asset, %amount, "engine balance swept");
        self.events.push(MarketEvent::FeesCollected(FeesCollected {
            asset: pay_asset,
            amount,
            collector: *self.treasury.collector(),
        }));
        Ok(amount)
    }

    /// Change the fee collector. Admin-only.
    pub fn set_collector(
        &mut self,
        caller: AccountId,
        new_collector: AccountId,
    ) -> Result<(), MarketError> {
        let previous = self.treasury.set_collector(&caller, new_collector)?;
        self.events
            .push(MarketEvent::CollectorChanged(CollectorChanged {
                previous,
                current: new_collector,
            }));
        Ok(())
    }

    /// Store a new fee rate. Admin-only. The rate is inert configuration.
    pub fn set_fee_rate(&mut self, caller: AccountId, rate: Decimal) -> Result<(), MarketError> {
        let previous = self.treasury.set_fee_rate(&caller, rate)?;
        self.events.push(MarketEvent::FeeRateChanged(FeeRateChanged {
            previous,
            current: rate,
        }));
        Ok(())
    }

    /// Hand the administrator role to a new principal. Admin-only.
    pub fn set_admin(&mut self, caller: AccountId, new_admin: AccountId) -> Result<(), MarketError> {
        self.treasury.set_admin(&caller, new_admin)
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn get_order(&self, order_id: OrderId) -> Result<&Order, MarketError> {
        self.registry.get(order_id)
    }

    /// The id the next created order will receive
    pub fn next_order_id(&self) -> OrderId {
        self.registry.next_id()
    }

    pub fn order_count(&self) -> usize {
        self.registry.len()
    }

    /// The engine's custody account
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn collector(&self) -> &AccountId {
        self.treasury.collector()
    }

    pub fn fee_rate(&self) -> Decimal {
        self.treasury.fee_rate()
    }

    pub fn admin(&self) -> &AccountId {
        self.treasury.admin()
    }

    /// Incoming-transfer acknowledgement hook required by the non-fungible
    /// custody protocol: the engine accepts any item directed at it.
    pub fn on_nft_received(
        &self,
        _operator: &AccountId,
        _from: &AccountId,
        _nft: &NftRef,
    ) -> bool {
        true
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Shared validation for cancel/fulfill: valid id, available, not
    /// expired, in that order. Returns a clone so the registry borrow ends
    /// before any mutation.
    fn checked_order(&self, order_id: OrderId, now: i64) -> Result<Order, MarketError> {
        let order = self.registry.get(order_id)?;
        if !order.available {
            return Err(MarketError::OrderNotAvailable { order_id });
        }
        if order.is_expired(now) {
            return Err(MarketError::OrderExpired {
                order_id,
                expired_at: order.expires_at,
            });
        }
        Ok(order.clone())
    }
}

fn check_terms(price: Decimal, expires_at: i64, now: i64) -> Result<(), MarketError> {
    if price < Decimal::ZERO {
        return Err(MarketError::InvalidOrderParameters {
            reason: "price must be non-negative".to_string(),
        });
    }
    if expires_at <= now {
        return Err(MarketError::InvalidOrderParameters {
            reason: "expiry must be strictly in the future".to_string(),
        });
    }
    Ok(())
}

fn check_attached(attached: Decimal) -> Result<(), MarketError> {
    if attached < Decimal::ZERO {
        return Err(MarketError::InvalidOrderParameters {
            reason: "attached amount must be non-negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FungibleLedger, NativeBank, NftRegistry};
    use crate::memory::{MemoryBank, MemoryNfts, MemoryToken};

    const NOW: i64 = 1_000;
    const LATER: i64 = 100_000;

    struct World {
        nfts: MemoryNfts,
        tokens: MemoryToken,
        bank: MemoryBank,
    }

    impl World {
        fn new() -> Self {
            Self {
                nfts: MemoryNfts::new(),
                tokens: MemoryToken::new(),
                bank: MemoryBank::new(),
            }
        }

        fn ledgers(&mut self) -> Ledgers<'_> {
            Ledgers {
                nfts: &mut self.nfts,
                tokens: &mut self.tokens,
                bank: &mut self.bank,
            }
        }
    }

    fn setup() -> (Marketplace, World, AccountId) {
        let admin = AccountId::new();
        (Marketplace::new(admin), World::new(), admin)
    }

    #[test]
    fn test_create_sell_escrows_item() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft.clone(),
                PayAsset::token("USDT"),
                Decimal::from(100),
                LATER,
                NOW,
            )
            .unwrap();

        assert_eq!(id, OrderId::new(0));
        assert_eq!(world.nfts.owner_of(&nft), Some(*market.account()));
        assert!(market.get_order(id).unwrap().available);
        assert!(matches!(market.events()[0], MarketEvent::OrderCreated(_)));
    }

    #[test]
    fn test_create_sell_not_owner() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        // Item never minted

        let result = market.create_sell(
            &mut world.ledgers(),
            proposer,
            nft.clone(),
            PayAsset::Native,
            Decimal::from(100),
            LATER,
            NOW,
        );
        assert_eq!(
            result,
            Err(MarketError::NotAssetOwner {
                nft,
                claimed_by: proposer
            })
        );
        assert_eq!(market.order_count(), 0);
    }

    #[test]
    fn test_create_sell_expiry_not_in_future() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());

        let result = market.create_sell(
            &mut world.ledgers(),
            proposer,
            nft.clone(),
            PayAsset::Native,
            Decimal::from(100),
            NOW,
            NOW,
        );
        assert!(matches!(
            result,
            Err(MarketError::InvalidOrderParameters { .. })
        ));
        // No custody movement happened
        assert_eq!(world.nfts.owner_of(&nft), Some(proposer));
    }

    #[test]
    fn test_create_buy_escrows_native_payment() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        world.bank.fund(&proposer, Decimal::from(100));

        let id = market
            .create_buy(
                &mut world.ledgers(),
                proposer,
                NftRef::new("PUNKS", 5),
                PayAsset::Native,
                Decimal::from(50),
                LATER,
                NOW,
                Decimal::from(50),
            )
            .unwrap();

        assert_eq!(id, OrderId::new(0));
        assert_eq!(world.bank.balance_of(market.account()), Decimal::from(50));
        assert_eq!(world.bank.balance_of(&proposer), Decimal::from(50));
    }

    #[test]
    fn test_create_buy_failed_pull_burns_no_id() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        // No token balance, no allowance

        let result = market.create_buy(
            &mut world.ledgers(),
            proposer,
            NftRef::new("PUNKS", 5),
            PayAsset::token("USDT"),
            Decimal::from(50),
            LATER,
            NOW,
            Decimal::ZERO,
        );
        assert!(matches!(result, Err(MarketError::Transfer(_))));
        assert_eq!(market.next_order_id(), OrderId::new(0));
        assert_eq!(market.order_count(), 0);
    }

    #[test]
    fn test_cancel_checks_in_order() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let stranger = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft,
                PayAsset::Native,
                Decimal::from(10),
                LATER,
                NOW,
            )
            .unwrap();

        // Unknown id
        let bad = OrderId::new(9);
        assert_eq!(
            market.cancel(&mut world.ledgers(), proposer, bad, NOW),
            Err(MarketError::InvalidOrderId { order_id: bad })
        );
        // Wrong caller
        assert_eq!(
            market.cancel(&mut world.ledgers(), stranger, id, NOW),
            Err(MarketError::NotAuthorized { caller: stranger })
        );
        // Success
        market.cancel(&mut world.ledgers(), proposer, id, NOW).unwrap();
        // Second cancel: unavailable
        assert_eq!(
            market.cancel(&mut world.ledgers(), proposer, id, NOW),
            Err(MarketError::OrderNotAvailable { order_id: id })
        );
    }

    #[test]
    fn test_cancel_sell_returns_item() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft.clone(),
                PayAsset::Native,
                Decimal::from(10),
                LATER,
                NOW,
            )
            .unwrap();
        market.cancel(&mut world.ledgers(), proposer, id, NOW).unwrap();

        assert_eq!(world.nfts.owner_of(&nft), Some(proposer));
        assert!(!market.get_order(id).unwrap().available);
    }

    #[test]
    fn test_cancel_buy_refunds_price_only() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        world.bank.fund(&proposer, Decimal::from(100));

        // Overpay: 80 attached against a price of 50
        let id = market
            .create_buy(
                &mut world.ledgers(),
                proposer,
                NftRef::new("PUNKS", 5),
                PayAsset::Native,
                Decimal::from(50),
                LATER,
                NOW,
                Decimal::from(80),
            )
            .unwrap();
        market.cancel(&mut world.ledgers(), proposer, id, NOW).unwrap();

        // Only the price comes back; the overpayment stays pooled
        assert_eq!(world.bank.balance_of(&proposer), Decimal::from(70));
        assert_eq!(world.bank.balance_of(market.account()), Decimal::from(30));
    }

    #[test]
    fn test_expired_order_is_stuck() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let other = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());
        world.bank.fund(&other, Decimal::from(100));

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft,
                PayAsset::Native,
                Decimal::from(10),
                2_000,
                NOW,
            )
            .unwrap();

        let after_expiry = 2_000;
        assert!(matches!(
            market.cancel(&mut world.ledgers(), proposer, id, after_expiry),
            Err(MarketError::OrderExpired { .. })
        ));
        assert!(matches!(
            market.fulfill_sell(&mut world.ledgers(), other, id, after_expiry, Decimal::from(10)),
            Err(MarketError::OrderExpired { .. })
        ));
        // Still flagged available; the escrow is unreachable
        assert!(market.get_order(id).unwrap().available);
    }

    #[test]
    fn test_fulfill_sell_by_proposer_rejected() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());
        world.bank.fund(&proposer, Decimal::from(100));

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft,
                PayAsset::Native,
                Decimal::from(10),
                LATER,
                NOW,
            )
            .unwrap();
        let result =
            market.fulfill_sell(&mut world.ledgers(), proposer, id, NOW, Decimal::from(10));
        assert_eq!(result, Err(MarketError::NotAuthorized { caller: proposer }));
    }

    #[test]
    fn test_fulfill_buy_requires_item_ownership() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let seller = AccountId::new();
        world.bank.fund(&proposer, Decimal::from(50));

        let id = market
            .create_buy(
                &mut world.ledgers(),
                proposer,
                NftRef::new("PUNKS", 5),
                PayAsset::Native,
                Decimal::from(50),
                LATER,
                NOW,
                Decimal::from(50),
            )
            .unwrap();

        // Seller does not own the item
        let result = market.fulfill_buy(&mut world.ledgers(), seller, id, NOW);
        assert!(matches!(result, Err(MarketError::Transfer(_))));
        // Nothing committed
        assert!(market.get_order(id).unwrap().available);
        assert_eq!(world.bank.balance_of(market.account()), Decimal::from(50));
    }

    #[test]
    fn test_fulfill_buy_payment_rejection_unwinds_item_leg() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let seller = AccountId::new();
        let nft = NftRef::new("PUNKS", 5);
        world.bank.fund(&proposer, Decimal::from(50));
        world.nfts.mint(&seller, nft.clone());
        // Seller refuses incoming native pushes
        world.bank.set_refuse_incoming(&seller, true);

        let id = market
            .create_buy(
                &mut world.ledgers(),
                proposer,
                nft.clone(),
                PayAsset::Native,
                Decimal::from(50),
                LATER,
                NOW,
                Decimal::from(50),
            )
            .unwrap();

        let result = market.fulfill_buy(&mut world.ledgers(), seller, id, NOW);
        assert!(matches!(result, Err(MarketError::Transfer(_))));
        // The item came back, the order is still open, the escrow intact
        assert_eq!(world.nfts.owner_of(&nft), Some(seller));
        assert!(market.get_order(id).unwrap().available);
        assert_eq!(world.bank.balance_of(market.account()), Decimal::from(50));
    }

    #[test]
    fn test_fulfill_wrong_kind() {
        let (mut market, mut world, _) = setup();
        let proposer = AccountId::new();
        let other = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft,
                PayAsset::Native,
                Decimal::from(10),
                LATER,
                NOW,
            )
            .unwrap();
        let result = market.fulfill_buy(&mut world.ledgers(), other, id, NOW);
        assert!(matches!(
            result,
            Err(MarketError::InvalidOrderParameters { .. })
        ));
    }

    #[test]
    fn test_on_nft_received_accepts() {
        let (market, _, _) = setup();
        let operator = AccountId::new();
        let from = AccountId::new();
        assert!(market.on_nft_received(&operator, &from, &NftRef::new("PUNKS", 3)));
    }

    #[test]
    fn test_fee_rate_is_inert() {
        let (mut market, mut world, admin) = setup();
        market
            .set_fee_rate(admin, Decimal::new(25, 3)) // 0.025
            .unwrap();

        let proposer = AccountId::new();
        let buyer = AccountId::new();
        let nft = NftRef::new("PUNKS", 0);
        world.nfts.mint(&proposer, nft.clone());
        world.tokens.mint(&buyer, "USDT", Decimal::from(100));

        let id = market
            .create_sell(
                &mut world.ledgers(),
                proposer,
                nft,
                PayAsset::token("USDT"),
                Decimal::from(100),
                LATER,
                NOW,
            )
            .unwrap();
        world
            .tokens
            .approve(&buyer, market.account(), "USDT", Decimal::from(100));
        market
            .fulfill_sell(&mut world.ledgers(), buyer, id, NOW, Decimal::ZERO)
            .unwrap();

        // The stored rate deducted nothing
        assert_eq!(world.tokens.balance_of(&proposer, "USDT"), Decimal::from(100));
        assert_eq!(world.tokens.balance_of(&buyer, "USDT"), Decimal::ZERO);
    }
}
