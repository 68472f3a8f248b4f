//! Collaborator contract for order persistence.

use std::sync::Arc;

use restock_core::{OrderId, StoreResult};

use crate::order::Order;

/// Read/write contract for orders.
///
/// `save` persists the order as one atomic unit from the caller's
/// perspective: a header without its lines (or vice versa) must never be
/// observable.
pub trait OrderRepository: Send + Sync {
    fn save(&self, order: Order) -> StoreResult<OrderId>;
    fn find_by_id(&self, order_id: OrderId) -> StoreResult<Option<Order>>;
    /// Orders not yet delivered (pending-order skip rule input).
    fn find_pending(&self) -> StoreResult<Vec<Order>>;
}

impl<S> OrderRepository for Arc<S>
where
    S: OrderRepository + ?Sized,
{
    fn save(&self, order: Order) -> StoreResult<OrderId> {
        (**self).save(order)
    }

    fn find_by_id(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        (**self).find_by_id(order_id)
    }

    fn find_pending(&self) -> StoreResult<Vec<Order>> {
        (**self).find_pending()
    }
}
