use std::collections::HashMap;
use std::sync::RwLock;

use restock_catalog::{
    DiscountRepository, DiscountTier, Offer, OfferKey, OfferRepository, best_tier_for_offer,
};
use restock_core::{AgreementId, CatalogNumber, ProductId, StoreError, StoreResult, SupplierId};

/// In-memory offer catalog.
///
/// Intended for tests/dev. Listings are returned in a deterministic order
/// (supplier, then catalog number).
#[derive(Debug, Default)]
pub struct InMemoryOfferStore {
    inner: RwLock<HashMap<OfferKey, Offer>>,
}

impl InMemoryOfferStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OfferRepository for InMemoryOfferStore {
    fn find_offers_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Offer>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut offers: Vec<Offer> = map
            .values()
            .filter(|o| o.product_id() == product_id)
            .cloned()
            .collect();
        offers.sort_by_key(|o| (o.supplier_id(), o.catalog_number()));
        Ok(offers)
    }

    fn find_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        catalog_number: CatalogNumber,
    ) -> StoreResult<Option<Offer>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map
            .get(&OfferKey {
                product_id,
                supplier_id,
                catalog_number,
            })
            .cloned())
    }

    fn find_cheapest_offer(&self, product_id: ProductId) -> StoreResult<Option<Offer>> {
        let offers = self.find_offers_by_product(product_id)?;
        Ok(offers
            .into_iter()
            .min_by(|a, b| {
                a.unit_price()
                    .total_cmp(&b.unit_price())
                    .then(a.supplier_id().cmp(&b.supplier_id()))
            }))
    }

    fn insert(&self, offer: Offer) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(offer.key(), offer);
        Ok(())
    }

    fn delete_for_agreement(&self, agreement_id: AgreementId) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.retain(|_, offer| offer.agreement_id() != agreement_id);
        Ok(())
    }
}

/// Upsert key of a discount tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct TierKey {
    product_id: ProductId,
    supplier_id: SupplierId,
    agreement_id: AgreementId,
    min_quantity: u32,
}

impl TierKey {
    fn of(tier: &DiscountTier) -> Self {
        Self {
            product_id: tier.product_id(),
            supplier_id: tier.supplier_id(),
            agreement_id: tier.agreement_id(),
            min_quantity: tier.min_quantity(),
        }
    }
}

/// In-memory discount tier store.
#[derive(Debug, Default)]
pub struct InMemoryDiscountStore {
    inner: RwLock<HashMap<TierKey, DiscountTier>>,
}

impl InMemoryDiscountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiscountRepository for InMemoryDiscountStore {
    fn find_tiers(&self, product_id: ProductId) -> StoreResult<Vec<DiscountTier>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut tiers: Vec<DiscountTier> = map
            .values()
            .filter(|t| t.product_id() == product_id)
            .cloned()
            .collect();
        tiers.sort_by_key(|t| (t.supplier_id(), t.agreement_id(), t.min_quantity()));
        Ok(tiers)
    }

    fn find_tiers_for_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<DiscountTier>> {
        Ok(self
            .find_tiers(product_id)?
            .into_iter()
            .filter(|t| t.qualifies(quantity))
            .collect())
    }

    fn find_best_tier(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
        quantity: u32,
    ) -> StoreResult<Option<DiscountTier>> {
        let tiers = self.find_tiers(product_id)?;
        Ok(best_tier_for_offer(&tiers, supplier_id, agreement_id, quantity).cloned())
    }

    fn upsert(&self, tier: DiscountTier) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(TierKey::of(&tier), tier);
        Ok(())
    }

    fn delete_for_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        agreement_id: AgreementId,
    ) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.retain(|_, t| {
            !(t.product_id() == product_id
                && t.supplier_id() == supplier_id
                && t.agreement_id() == agreement_id)
        });
        Ok(())
    }
}
