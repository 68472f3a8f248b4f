use std::collections::HashMap;
use std::sync::RwLock;

use restock_core::{OrderId, StoreError, StoreResult};
use restock_purchasing::{Order, OrderRepository};

/// In-memory order store.
///
/// `save` inserts the whole order value under one key, so the header and
/// its lines are never observable separately.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a stored order with its delivered copy (test/dev support
    /// for the pending-order skip rule).
    pub fn mark_delivered(&self, order_id: OrderId) -> StoreResult<bool> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match map.remove(&order_id) {
            Some(order) => {
                map.insert(order_id, order.into_delivered());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl OrderRepository for InMemoryOrderStore {
    fn save(&self, order: Order) -> StoreResult<OrderId> {
        let order_id = order.id_typed();
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(order_id, order);
        Ok(order_id)
    }

    fn find_by_id(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&order_id).cloned())
    }

    fn find_pending(&self) -> StoreResult<Vec<Order>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().filter(|o| o.is_pending()).cloned().collect())
    }
}
