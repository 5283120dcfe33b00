//! Escrow Order Book for Non-Fungible Assets
//!
//! This crate implements the contract layer of a two-sided escrow order
//! book: sellers escrow an item and ask a price, buyers escrow a payment
//! and name an item. The core is the order lifecycle state machine with an
//! asymmetric custody model: a `Sell` order escrows the item and never the
//! payment, a `Buy` order escrows the payment and never the item.
//!
//! # Modules
//! - `errors`: Error taxonomy for lifecycle and ledger failures
//! - `events`: Market events emitted by committed operations
//! - `ledger`: External ledger capabilities the engine consumes
//! - `memory`: In-memory reference ledgers for tests and local runs
//! - `custody`: Uniform take/release of escrowed assets
//! - `registry`: Append-only order store with sequential id allocation
//! - `market`: The lifecycle state machine (create, cancel, fulfill)
//! - `treasury`: Administrative fee surface (collector, rate, sweep)
//!
//! # Key Invariants
//! - Order ids are dense and strictly increasing from 0, never reused
//! - `available` flips `true -> false` at most once per order
//! - `available` flips before any outbound release call is issued
//! - Every failed operation leaves registry and custody state untouched

pub mod custody;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod market;
pub mod memory;
pub mod registry;
pub mod treasury;

pub use market::Marketplace;

/// Market ABI version, frozen after release
pub const MARKET_ABI_VERSION: &str = "1.0.0";
