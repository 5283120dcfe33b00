//! Unique identifier types for marketplace entities
//!
//! Principals use UUID v7 for time-sortable ordering. Order identifiers are
//! dense sequential integers assigned by the order registry: they start at 0,
//! never decrease, and are never reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a principal.
///
/// Identifies every party the engine deals with: order proposers,
/// fulfillers, the administrator, the fee collector, and the engine's own
/// custody account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new AccountId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential identifier for an order.
///
/// Allocated only by the order registry. Ids are dense and strictly
/// increasing from 0; after N creations the registry holds exactly the ids
/// `0..N`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw identifier value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a non-fungible collection.
///
/// A named collection of uniquely identified items (e.g. "PUNKS").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Create a new CollectionId from a symbol
    ///
    /// # Panics
    /// Panics if the symbol is empty
    pub fn new(symbol: impl Into<String>) -> Self {
        let s = symbol.into();
        assert!(!s.is_empty(), "CollectionId must not be empty");
        Self(s)
    }

    /// Try to create a CollectionId, returning None if invalid
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let s = symbol.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Get the symbol string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
