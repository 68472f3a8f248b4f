use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use restock_catalog::{Offer, OfferRepository};
use restock_core::{AgreementId, CatalogNumber, ProductId, StoreError, StoreResult, SupplierId};

/// Bounded-cache configuration.
///
/// Capacity and eviction are explicit here rather than ambient: the cache
/// is constructed from this config and injected where needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of product listings held at once; least-recently-used
    /// entries are evicted past this.
    pub capacity: NonZeroUsize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // 256 product listings covers a branch's active assortment.
            capacity: NonZeroUsize::new(256).expect("non-zero literal"),
        }
    }
}

/// Caching decorator over an [`OfferRepository`].
///
/// Caches the per-product offer listing, the hot read of the resolution
/// path, with LRU eviction at a fixed capacity. Writes invalidate the
/// affected entries synchronously before returning, so a read through the
/// same key never sees stale data.
#[derive(Debug)]
pub struct CachedOfferStore<S> {
    inner: S,
    by_product: Mutex<LruCache<ProductId, Vec<Offer>>>,
}

impl<S: OfferRepository> CachedOfferStore<S> {
    pub fn new(inner: S, config: CacheConfig) -> Self {
        Self {
            inner,
            by_product: Mutex::new(LruCache::new(config.capacity)),
        }
    }
}

impl<S: OfferRepository> OfferRepository for CachedOfferStore<S> {
    fn find_offers_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Offer>> {
        {
            let mut cache = self.by_product.lock().map_err(|_| StoreError::Poisoned)?;
            if let Some(offers) = cache.get(&product_id) {
                return Ok(offers.clone());
            }
        }

        let offers = self.inner.find_offers_by_product(product_id)?;
        let mut cache = self.by_product.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some((evicted, _)) = cache.push(product_id, offers.clone()) {
            if evicted != product_id {
                tracing::debug!(product = %evicted, "evicted offer listing from cache");
            }
        }
        Ok(offers)
    }

    fn find_offer(
        &self,
        product_id: ProductId,
        supplier_id: SupplierId,
        catalog_number: CatalogNumber,
    ) -> StoreResult<Option<Offer>> {
        // Point lookups are rare (catalog maintenance); go straight through.
        self.inner.find_offer(product_id, supplier_id, catalog_number)
    }

    fn find_cheapest_offer(&self, product_id: ProductId) -> StoreResult<Option<Offer>> {
        let offers = self.find_offers_by_product(product_id)?;
        Ok(offers.into_iter().min_by(|a, b| {
            a.unit_price()
                .total_cmp(&b.unit_price())
                .then(a.supplier_id().cmp(&b.supplier_id()))
        }))
    }

    fn insert(&self, offer: Offer) -> StoreResult<()> {
        let product_id = offer.product_id();
        self.inner.insert(offer)?;
        let mut cache = self.by_product.lock().map_err(|_| StoreError::Poisoned)?;
        cache.pop(&product_id);
        Ok(())
    }

    fn delete_for_agreement(&self, agreement_id: AgreementId) -> StoreResult<()> {
        self.inner.delete_for_agreement(agreement_id)?;
        // An agreement's offers can span many products; drop everything.
        let mut cache = self.by_product.lock().map_err(|_| StoreError::Poisoned)?;
        cache.clear();
        Ok(())
    }
}
