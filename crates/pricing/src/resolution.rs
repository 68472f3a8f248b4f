use serde::{Deserialize, Serialize};

use restock_core::{AgreementId, ProductId, SupplierId, ValueObject};

/// Value object: the resolver's answer for one requested product.
///
/// Ephemeral: built per resolution call and folded into an order line;
/// never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLineItem {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    pub agreement_id: AgreementId,
    /// Listed unit price of the winning offer (before discount).
    pub unit_price: f64,
    /// Discount percent actually applied; 0 when no tier qualified.
    pub discount_percent: f64,
    pub quantity: u32,
}

impl ResolvedLineItem {
    /// Unit price after the applied discount.
    pub fn net_unit_price(&self) -> f64 {
        self.unit_price * (1.0 - self.discount_percent / 100.0)
    }

    /// Total cost of the line as compared by the resolver.
    pub fn total_cost(&self) -> f64 {
        self.unit_price * self.quantity as f64 * (1.0 - self.discount_percent / 100.0)
    }

    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0.0
    }
}

impl ValueObject for ResolvedLineItem {}

/// Outcome of resolving one requested product.
///
/// `Unresolved` is a first-class result, not an error: a product no
/// supplier can provide is reported to the caller and must never abort the
/// rest of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Resolved(ResolvedLineItem),
    Unresolved(ProductId),
}

impl Resolution {
    pub fn resolved(self) -> Option<ResolvedLineItem> {
        match self {
            Resolution::Resolved(line) => Some(line),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved(_))
    }
}
