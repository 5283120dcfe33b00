//! Error taxonomy for the escrow order book
//!
//! Every failure is synchronous and operation-aborting: nothing is retried
//! internally, and a failed call leaves registry and custody state exactly
//! as it was. Variants carry the offending identifiers so the caller learns
//! which precondition failed, not a generic rejection.

use rust_decimal::Decimal;
use thiserror::Error;
use types::asset::NftRef;
use types::ids::{AccountId, OrderId};

/// Lifecycle and administration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Not the owner of {nft}: {claimed_by}")]
    NotAssetOwner { nft: NftRef, claimed_by: AccountId },

    #[error("Invalid order id: {order_id}")]
    InvalidOrderId { order_id: OrderId },

    #[error("Order {order_id} is no longer available")]
    OrderNotAvailable { order_id: OrderId },

    #[error("Order {order_id} expired at {expired_at}")]
    OrderExpired { order_id: OrderId, expired_at: i64 },

    #[error("Caller {caller} is not authorized")]
    NotAuthorized { caller: AccountId },

    #[error("Invalid order parameters: {reason}")]
    InvalidOrderParameters { reason: String },

    #[error("Insufficient payment: required {required}, attached {attached}")]
    InsufficientPayment { required: Decimal, attached: Decimal },

    /// Opaque failure propagated from an external ledger
    #[error("Asset transfer failed: {0}")]
    Transfer(#[from] LedgerError),
}

/// Failures surfaced by the external asset ledgers.
///
/// The fungible ledger, the non-fungible registry, and the native bank are
/// external collaborators; these are the only ways their primitives fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: String,
        available: String,
    },

    #[error("Insufficient allowance for {asset}: owner {owner}, spender {spender}")]
    InsufficientAllowance {
        asset: String,
        owner: AccountId,
        spender: AccountId,
    },

    #[error("Not the current owner of {nft}: {claimed_by}")]
    NotOwner { nft: NftRef, claimed_by: AccountId },

    #[error("Recipient rejected the transfer: {to}")]
    TransferRejected { to: AccountId },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_error_display() {
        let err = MarketError::OrderExpired {
            order_id: OrderId::new(3),
            expired_at: 1_700_000_000,
        };
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("1700000000"));
    }

    #[test]
    fn test_insufficient_payment_display() {
        let err = MarketError::InsufficientPayment {
            required: Decimal::from(50),
            attached: Decimal::from(20),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: required 50, attached 20"
        );
    }

    #[test]
    fn test_ledger_error_display() {
        let err = LedgerError::InsufficientBalance {
            asset: "USDT".to_string(),
            required: "100".to_string(),
            available: "40".to_string(),
        };
        assert!(err.to_string().contains("USDT"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_market_error_from_ledger_error() {
        let ledger_err = LedgerError::Overflow;
        let market_err: MarketError = ledger_err.into();
        assert!(matches!(market_err, MarketError::Transfer(_)));
    }
}
