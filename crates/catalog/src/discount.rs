use serde::{Deserialize, Serialize};

use restock_core::{AgreementId, DomainError, DomainResult, ProductId, SupplierId, ValueObject};

/// Value object: a quantity-threshold discount on one offer.
///
/// "If the ordered quantity is at least `min_quantity`, apply
/// `discount_percent` to the offer's unit price." Tiers are keyed by
/// `(product, supplier, agreement, min_quantity)`; writing a tier with an
/// existing key replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    product_id: ProductId,
    supplier_id: SupplierId,
    agreement_id: AgreementId,
    min_quantity: u32,
    discount_percent: f64,
}

impl DiscountTier {
    /// Validation boundary: a tier outside `[0,100]` percent or with a
    /// threshold below 1 never reaches a store.
    pub fn new(
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
        min_quantity: u32,
        discount_percent: f64,
    ) -> DomainResult<Self> {
        if min_quantity < 1 {
            return Err(DomainError::validation(
                "discount tier minimum quantity must be at least 1",
            ));
        }
        if !discount_percent.is_finite() || !(0.0..=100.0).contains(&discount_percent) {
            return Err(DomainError::validation(format!(
                "discount percent must be within [0,100], got {discount_percent}"
            )));
        }
        Ok(Self {
            product_id,
            supplier_id,
            agreement_id,
            min_quantity,
            discount_percent,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn agreement_id(&self) -> AgreementId {
        self.agreement_id
    }

    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    /// Whether this tier applies to an order of `quantity`.
    pub fn qualifies(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
    }

    /// Whether this tier belongs to the given offer.
    pub fn is_for_offer(&self, supplier_id: SupplierId, agreement_id: AgreementId) -> bool {
        self.supplier_id == supplier_id && self.agreement_id == agreement_id
    }
}

impl ValueObject for DiscountTier {}

/// Best tier for a quantity across all suppliers of one product: the
/// qualifying tier with the highest discount percent, ties broken by the
/// lowest supplier id (then lowest agreement id) so the answer is
/// deterministic.
pub fn best_tier_for_quantity(tiers: &[DiscountTier], quantity: u32) -> Option<&DiscountTier> {
    tiers
        .iter()
        .filter(|t| t.qualifies(quantity))
        .min_by(|a, b| {
            b.discount_percent
                .total_cmp(&a.discount_percent)
                .then(a.supplier_id.cmp(&b.supplier_id))
                .then(a.agreement_id.cmp(&b.agreement_id))
        })
}

/// Best tier for a quantity on one specific offer: the qualifying tier with
/// the highest threshold (the most specific volume break the quantity
/// unlocked).
pub fn best_tier_for_offer(
    tiers: &[DiscountTier],
    supplier_id: SupplierId,
    agreement_id: AgreementId,
    quantity: u32,
) -> Option<&DiscountTier> {
    tiers
        .iter()
        .filter(|t| t.is_for_offer(supplier_id, agreement_id) && t.qualifies(quantity))
        .max_by_key(|t| t.min_quantity)
}
