use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{DomainError, DomainResult, Entity, OrderId, ProductId, SupplierId};

/// Order fulfillment status.
///
/// A pending order blocks the automatic replenishment path from re-ordering
/// the same products; delivery closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Delivered,
}

/// One order line: the chosen supplier for a quantity of one product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    pub quantity: u32,
}

/// Entity: Order.
///
/// Created once, after every requested product has been resolved, and
/// immutable thereafter. A single order may legitimately span multiple
/// suppliers; each line carries its chosen supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    requester_ref: String,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(
        id: OrderId,
        requester_ref: impl Into<String>,
        order_date: DateTime<Utc>,
        lines: Vec<OrderLine>,
    ) -> DomainResult<Self> {
        let requester_ref = requester_ref.into();
        if requester_ref.trim().is_empty() {
            return Err(DomainError::validation("requester reference cannot be empty"));
        }
        if lines.is_empty() {
            return Err(DomainError::validation("order must carry at least one line"));
        }
        if lines.iter().any(|l| l.quantity == 0) {
            return Err(DomainError::invariant("order lines must have positive quantity"));
        }
        Ok(Self {
            id,
            requester_ref,
            order_date,
            status: OrderStatus::Pending,
            lines,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn requester_ref(&self) -> &str {
        &self.requester_ref
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Products this order covers (pending-order skip rule input).
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.lines.iter().map(|l| l.product_id)
    }

    /// Value-style transition: the delivered copy of this order.
    pub fn into_delivered(mut self) -> Self {
        self.status = OrderStatus::Delivered;
        self
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
