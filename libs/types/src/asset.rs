//! Asset references
//!
//! The marketplace trades a non-fungible item against a fungible payment.
//! `NftRef` names one uniquely identified item in a collection; `PayAsset`
//! names the payment side, with `Native` standing in for the platform's
//! built-in value unit (the reserved sentinel of the wire protocol).

use crate::ids::CollectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a single non-fungible item: (collection, item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NftRef {
    pub collection: CollectionId,
    pub item: u64,
}

impl NftRef {
    pub fn new(collection: impl Into<CollectionId>, item: u64) -> Self {
        Self {
            collection: collection.into(),
            item,
        }
    }
}

impl fmt::Display for NftRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.collection, self.item)
    }
}

/// Payment asset for an order.
///
/// `Native` is the reserved sentinel denoting the platform currency;
/// `Token` carries the symbol of a fungible asset tracked by the external
/// fungible ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "symbol")]
pub enum PayAsset {
    #[serde(rename = "NATIVE")]
    Native,
    #[serde(rename = "TOKEN")]
    Token(String),
}

impl PayAsset {
    /// Check whether this is the native-currency sentinel
    pub fn is_native(&self) -> bool {
        matches!(self, PayAsset::Native)
    }

    /// Build a fungible-token payment asset from its symbol
    pub fn token(symbol: impl Into<String>) -> Self {
        PayAsset::Token(symbol.into())
    }
}

impl fmt::Display for PayAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayAsset::Native => write!(f, "NATIVE"),
            PayAsset::Token(symbol) => write!(f, "{}", symbol),
        }
    }
}
