//! Market events
//!
//! Events are immutable records appended by committed operations. An event
//! is pushed only after every effect of its operation has committed; an
//! aborted operation emits nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::asset::{NftRef, PayAsset};
use types::ids::{AccountId, OrderId};
use types::order::OrderKind;

/// A new order entered the book and its escrow leg was taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub kind: OrderKind,
    pub proposer: AccountId,
    pub nft: NftRef,
    pub pay_asset: PayAsset,
    pub price: Decimal,
    pub expires_at: i64,
}

/// An open order was cancelled by its proposer and its escrow returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: OrderId,
    pub proposer: AccountId,
}

/// An open order was fulfilled by a counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFulfilled {
    pub order_id: OrderId,
    pub fulfiller: AccountId,
}

/// The administrator swept the engine-held balance of an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeesCollected {
    pub asset: PayAsset,
    pub amount: Decimal,
    pub collector: AccountId,
}

/// The fee collector address changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorChanged {
    pub previous: AccountId,
    pub current: AccountId,
}

/// The stored fee rate changed (configuration only; no settlement consumes it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRateChanged {
    pub previous: Decimal,
    pub current: Decimal,
}

/// Enum wrapper for all market events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketEvent {
    OrderCreated(OrderCreated),
    OrderCancelled(OrderCancelled),
    OrderFulfilled(OrderFulfilled),
    FeesCollected(FeesCollected),
    CollectorChanged(CollectorChanged),
    FeeRateChanged(FeeRateChanged),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_created_serialization() {
        let event = OrderCreated {
            order_id: OrderId::new(0),
            kind: OrderKind::Sell,
            proposer: AccountId::new(),
            nft: NftRef::new("PUNKS", 0),
            pay_asset: PayAsset::token("USDT"),
            price: Decimal::from(100),
            expires_at: 1_700_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: OrderCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_market_event_enum_variant() {
        let event = MarketEvent::OrderCancelled(OrderCancelled {
            order_id: OrderId::new(4),
            proposer: AccountId::new(),
        });
        assert!(matches!(event, MarketEvent::OrderCancelled(_)));
    }

    #[test]
    fn test_fees_collected_serialization() {
        let event = FeesCollected {
            asset: PayAsset::Native,
            amount: Decimal::from(30),
            collector: AccountId::new(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: FeesCollected = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }
}
