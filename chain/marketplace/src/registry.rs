//! OrderRegistry — append-only order store
//!
//! An arena indexed by a monotonic integer key: ids are allocated
//! sequentially from 0, never reused, and orders are never deleted. After N
//! creations the registry holds exactly N records.

use types::ids::OrderId;
use types::order::Order;

use crate::errors::MarketError;

#[derive(Debug, Default)]
pub struct OrderRegistry {
    /// Next id to allocate; also the number of ids handed out so far
    next: u64,
    /// Arena: `orders[i]` is the order with id `i`
    orders: Vec<Order>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next unused identifier and advance the counter.
    /// Never fails.
    pub fn allocate(&mut self) -> OrderId {
        let id = OrderId::new(self.next);
        self.next += 1;
        id
    }

    /// Insert or overwrite the record at its own id slot.
    pub fn store(&mut self, order: Order) {
        let index = order.id.as_u64() as usize;
        if index == self.orders.len() {
            self.orders.push(order);
        } else {
            self.orders[index] = order;
        }
    }

    /// Fetch an order; fails when the id was never allocated.
    pub fn get(&self, id: OrderId) -> Result<&Order, MarketError> {
        if id.as_u64() >= self.next {
            return Err(MarketError::InvalidOrderId { order_id: id });
        }
        self.orders
            .get(id.as_u64() as usize)
            .ok_or(MarketError::InvalidOrderId { order_id: id })
    }

    /// Flip `available` to `false`. The caller guarantees the current value
    /// is `true`.
    pub(crate) fn mark_unavailable(&mut self, id: OrderId) {
        if let Some(order) = self.orders.get_mut(id.as_u64() as usize) {
            debug_assert!(order.available, "mark_unavailable on a closed order");
            order.available = false;
        }
    }

    /// Restore `available` after an aborted release, so a failed operation
    /// commits nothing. Not part of the public lifecycle: the one-shot
    /// `true -> false` transition holds for every committed operation.
    pub(crate) fn mark_available(&mut self, id: OrderId) {
        if let Some(order) = self.orders.get_mut(id.as_u64() as usize) {
            debug_assert!(!order.available, "mark_available on an open order");
            order.available = true;
        }
    }

    /// Number of stored orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The id the next allocation will return
    pub fn next_id(&self) -> OrderId {
        OrderId::new(self.next)
    }
}
