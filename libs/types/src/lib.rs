//! Types library for the escrow order book
//!
//! This library provides the core type definitions shared across the
//! marketplace system: principal and order identifiers, asset references,
//! and the order record with its one-shot availability flag.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, OrderId, CollectionId)
//! - `asset`: Asset references (NftRef, PayAsset)
//! - `order`: Order record and lifecycle flag

// Public modules
pub mod asset;
pub mod ids;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::ids::*;
    pub use crate::order::*;
}
