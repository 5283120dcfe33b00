//! Order record and lifecycle flag
//!
//! An order is a standing offer to trade: `Sell` offers an escrowed
//! non-fungible item for payment, `Buy` offers escrowed payment for an item
//! the proposer does not yet own. Every field is immutable after creation
//! except `available`, which flips `true -> false` exactly once on
//! cancellation or fulfillment and never flips back.

use crate::asset::{NftRef, PayAsset};
use crate::ids::{AccountId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the trade the proposer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Proposer offers a non-fungible item, escrowed at creation
    Sell,
    /// Proposer offers payment, escrowed at creation
    Buy,
}

/// Complete order record.
///
/// Retained indefinitely as an immutable historical record once closed;
/// orders are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    pub proposer: AccountId,
    pub nft: NftRef,
    pub pay_asset: PayAsset,
    pub price: Decimal,
    /// Absolute expiry timestamp (Unix seconds). Evaluated dynamically on
    /// every validity check; there is no persisted Expired status.
    pub expires_at: i64,
    pub created_at: i64,
    pub available: bool,
}

impl Order {
    /// Create a new open order
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        kind: OrderKind,
        proposer: AccountId,
        nft: NftRef,
        pay_asset: PayAsset,
        price: Decimal,
        expires_at: i64,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            kind,
            proposer,
            nft,
            pay_asset,
            price,
            expires_at,
            created_at,
            available: true,
        }
    }

    /// Dynamic expiry check against the supplied current time.
    ///
    /// An order that is still `available` but past its expiry is neither
    /// cancelable nor fulfillable.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(expires_at: i64) -> Order {
        Order::new(
            OrderId::new(0),
            OrderKind::Sell,
            AccountId::new(),
            NftRef::new("PUNKS", 0),
            PayAsset::token("USDT"),
            Decimal::from(100),
            expires_at,
            1_000,
        )
    }

    #[test]
    fn test_order_available_at_creation() {
        let order = sample_order(10_000);
        assert!(order.available);
        assert_eq!(order.id, OrderId::new(0));
        assert_eq!(order.kind, OrderKind::Sell);
    }

    #[test]
    fn test_order_expiry_boundary() {
        let order = sample_order(10_000);
        assert!(!order.is_expired(9_999));
        // Expiry is inclusive: at the stored timestamp the order is dead
        assert!(order.is_expired(10_000));
        assert!(order.is_expired(10_001));
    }

    #[test]
    fn test_order_kind_serialization() {
        assert_eq!(serde_json::to_string(&OrderKind::Sell).unwrap(), "\"SELL\"");
        assert_eq!(serde_json::to_string(&OrderKind::Buy).unwrap(), "\"BUY\"");
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order(10_000);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
