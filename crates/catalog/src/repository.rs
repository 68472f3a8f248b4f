//! Collaborator contracts for the offer catalog and the discount tier store.
//!
//! The resolution path is read-only; the write operations exist for catalog
//! maintenance (linking/unlinking agreements) and are simple key-based
//! mutations, not part of the pricing algorithm.

use std::sync::Arc;

use restock_core::{AgreementId, CatalogNumber, ProductId, StoreResult, SupplierId};

use crate::discount::DiscountTier;
use crate::offer::Offer;

/// Read/write contract for supplier offers.
pub trait OfferRepository: Send + Sync {
    /// All offers able to supply the product, across suppliers/agreements.
    fn find_offers_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Offer>>;

    /// Lookup by business key.
    fn find_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        catalog_number: CatalogNumber,
    ) -> StoreResult<Option<Offer>>;

    /// Cheapest offer by listed unit price (no discounts considered).
    fn find_cheapest_offer(&self, product_id: ProductId) -> StoreResult<Option<Offer>>;

    /// Insert or replace the offer with the same business key.
    fn insert(&self, offer: Offer) -> StoreResult<()>;

    /// Cascade support: drop every offer created under an agreement.
    fn delete_for_agreement(&self, agreement_id: AgreementId) -> StoreResult<()>;
}

/// Read/write contract for discount tiers.
pub trait DiscountRepository: Send + Sync {
    /// Every tier for the product, across all offers.
    fn find_tiers(&self, product_id: ProductId) -> StoreResult<Vec<DiscountTier>>;

    /// Tiers for the product whose threshold the quantity meets.
    fn find_tiers_for_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<DiscountTier>>;

    /// Best qualifying tier restricted to one offer (highest threshold).
    fn find_best_tier(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
        quantity: u32,
    ) -> StoreResult<Option<DiscountTier>>;

    /// Insert or replace the tier with the same `(product, supplier,
    /// agreement, min_quantity)` key.
    fn upsert(&self, tier: DiscountTier) -> StoreResult<()>;

    /// Cascade support: drop every tier hanging off one offer.
    fn delete_for_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
    ) -> StoreResult<()>;
}

impl<S> OfferRepository for Arc<S>
where
    S: OfferRepository + ?Sized,
{
    fn find_offers_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Offer>> {
        (**self).find_offers_by_product(product_id)
    }

    fn find_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        catalog_number: CatalogNumber,
    ) -> StoreResult<Option<Offer>> {
        (**self).find_offer(product_id, supplier_id, catalog_number)
    }

    fn find_cheapest_offer(&self, product_id: ProductId) -> StoreResult<Option<Offer>> {
        (**self).find_cheapest_offer(product_id)
    }

    fn insert(&self, offer: Offer) -> StoreResult<()> {
        (**self).insert(offer)
    }

    fn delete_for_agreement(&self, agreement_id: AgreementId) -> StoreResult<()> {
        (**self).delete_for_agreement(agreement_id)
    }
}

impl<S> DiscountRepository for Arc<S>
where
    S: DiscountRepository + ?Sized,
{
    fn find_tiers(&self, product_id: ProductId) -> StoreResult<Vec<DiscountTier>> {
        (**self).find_tiers(product_id)
    }

    fn find_tiers_for_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<DiscountTier>> {
        (**self).find_tiers_for_quantity(product_id, quantity)
    }

    fn find_best_tier(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
        quantity: u32,
    ) -> StoreResult<Option<DiscountTier>> {
        (**self).find_best_tier(product_id, supplier_id, agreement_id, quantity)
    }

    fn upsert(&self, tier: DiscountTier) -> StoreResult<()> {
        (**self).upsert(tier)
    }

    fn delete_for_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
    ) -> StoreResult<()> {
        (**self).delete_for_offer(product_id, supplier_id, agreement_id)
    }
}
