use std::cmp::Ordering;

use restock_catalog::{DiscountRepository, DiscountTier, Offer, OfferRepository, best_tier_for_offer};
use restock_core::{ProductId, StoreResult};

use crate::resolution::{Resolution, ResolvedLineItem};

/// Price resolution engine.
///
/// For one `(product, quantity)` pair, evaluates all known offers and the
/// discount tiers the quantity qualifies for, and picks the lowest total
/// cost. Suppliers compete on a mix of base price and volume discount, so
/// the comparison is always on total cost: a higher listed price with a
/// steep volume break can beat a cheaper list price.
///
/// The engine only reads. Collaborator failures propagate to the caller of
/// `resolve` for that product alone; batch callers continue with the rest.
#[derive(Debug)]
pub struct PriceResolver<O, D> {
    offers: O,
    tiers: D,
}

/// One offer paired with its best applicable tier for the quantity.
struct Candidate<'a> {
    offer: &'a Offer,
    tier: Option<&'a DiscountTier>,
}

impl<'a> Candidate<'a> {
    fn discount_percent(&self) -> f64 {
        self.tier.map(|t| t.discount_percent()).unwrap_or(0.0)
    }

    fn has_discount(&self) -> bool {
        self.discount_percent() > 0.0
    }

    fn total_cost(&self, quantity: u32) -> f64 {
        self.offer.unit_price() * quantity as f64 * (1.0 - self.discount_percent() / 100.0)
    }
}

impl<O, D> PriceResolver<O, D>
where
    O: OfferRepository,
    D: DiscountRepository,
{
    pub fn new(offers: O, tiers: D) -> Self {
        Self { offers, tiers }
    }

    /// Resolve one requested product to the cheapest supplier offer.
    ///
    /// - No offers at all → [`Resolution::Unresolved`].
    /// - Qualifying tiers exist → lowest total cost across offers with
    ///   their best applicable tier; exact tie prefers a discounted offer,
    ///   then the lower supplier id.
    /// - No qualifying tier anywhere → lowest listed unit price, ties by
    ///   lower supplier id.
    pub fn resolve(&self, product_id: ProductId, quantity: u32) -> StoreResult<Resolution> {
        let offers = self.offers.find_offers_by_product(product_id)?;
        if offers.is_empty() {
            tracing::debug!(%product_id, "no supplier offers, product unresolved");
            return Ok(Resolution::Unresolved(product_id));
        }

        let tiers = self.tiers.find_tiers_for_quantity(product_id, quantity)?;

        let winner = if tiers.is_empty() {
            self.cheapest_by_unit_price(&offers)
        } else {
            self.cheapest_by_total_cost(&offers, &tiers, quantity)
        };

        let line = ResolvedLineItem {
            product_id,
            supplier_id: winner.offer.supplier_id(),
            agreement_id: winner.offer.agreement_id(),
            unit_price: winner.offer.unit_price(),
            discount_percent: winner.discount_percent(),
            quantity,
        };
        tracing::debug!(
            %product_id,
            supplier = %line.supplier_id,
            total_cost = line.total_cost(),
            discount = line.discount_percent,
            "resolved product to cheapest offer"
        );
        Ok(Resolution::Resolved(line))
    }

    fn cheapest_by_unit_price<'a>(&self, offers: &'a [Offer]) -> Candidate<'a> {
        let offer = offers
            .iter()
            .min_by(|a, b| {
                a.unit_price()
                    .total_cmp(&b.unit_price())
                    .then(a.supplier_id().cmp(&b.supplier_id()))
            })
            .expect("offers checked non-empty");
        Candidate { offer, tier: None }
    }

    fn cheapest_by_total_cost<'a>(
        &self,
        offers: &'a [Offer],
        tiers: &'a [DiscountTier],
        quantity: u32,
    ) -> Candidate<'a> {
        offers
            .iter()
            .map(|offer| Candidate {
                offer,
                tier: best_tier_for_offer(
                    tiers,
                    offer.supplier_id(),
                    offer.agreement_id(),
                    quantity,
                ),
            })
            .min_by(|a, b| Self::compare_candidates(a, b, quantity))
            .expect("offers checked non-empty")
    }

    /// Total cost, then prefer the discounted offer on an exact tie, then
    /// the lower supplier id.
    fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>, quantity: u32) -> Ordering {
        a.total_cost(quantity)
            .total_cmp(&b.total_cost(quantity))
            .then(b.has_discount().cmp(&a.has_discount()))
            .then(a.offer.supplier_id().cmp(&b.offer.supplier_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_catalog::UnitOfMeasure;
    use restock_core::{AgreementId, CatalogNumber, StoreError, SupplierId};

    /// Plain vector-backed catalog, enough to drive the resolver in tests.
    #[derive(Debug)]
    struct FixtureCatalog {
        offers: Vec<Offer>,
        tiers: Vec<DiscountTier>,
    }

    impl OfferRepository for FixtureCatalog {
        fn find_offers_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Offer>> {
            Ok(self
                .offers
                .iter()
                .filter(|o| o.product_id() == product_id)
                .cloned()
                .collect())
        }

        fn find_offer(
            &self,
            product_id: ProductId,
            supplier_id: SupplierId,
            catalog_number: CatalogNumber,
        ) -> StoreResult<Option<Offer>> {
            Ok(self
                .offers
                .iter()
                .find(|o| {
                    o.product_id() == product_id
                        && o.supplier_id() == supplier_id
                        && o.catalog_number() == catalog_number
                })
                .cloned())
        }

        fn find_cheapest_offer(&self, product_id: ProductId) -> StoreResult<Option<Offer>> {
            let mut offers = self.find_offers_by_product(product_id)?;
            offers.sort_by(|a, b| a.unit_price().total_cmp(&b.unit_price()));
            Ok(offers.into_iter().next())
        }

        fn insert(&self, _offer: Offer) -> StoreResult<()> {
            unimplemented!("fixture is read-only")
        }

        fn delete_for_agreement(&self, _agreement_id: AgreementId) -> StoreResult<()> {
            unimplemented!("fixture is read-only")
        }
    }

    impl DiscountRepository for FixtureCatalog {
        fn find_tiers(&self, product_id: ProductId) -> StoreResult<Vec<DiscountTier>> {
            Ok(self
                .tiers
                .iter()
                .filter(|t| t.product_id() == product_id)
                .cloned()
                .collect())
        }

        fn find_tiers_for_quantity(
            &self,
            product_id: ProductId,
            quantity: u32,
        ) -> StoreResult<Vec<DiscountTier>> {
            Ok(self
                .tiers
                .iter()
                .filter(|t| t.product_id() == product_id && t.qualifies(quantity))
                .cloned()
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

        fn upsert(&self, _tier: DiscountTier) -> StoreResult<()> {
            unimplemented!("fixture is read-only")
        }

        fn delete_for_offer(
            &self,
            _product_id: ProductId,
            _supplier_id: SupplierId,
            _agreement_id: AgreementId,
        ) -> StoreResult<()> {
            unimplemented!("fixture is read-only")
        }
    }

    /// Catalog whose backend is down; every read fails.
    struct OfflineCatalog;

    impl OfferRepository for OfflineCatalog {
        fn find_offers_by_product(&self, _product_id: ProductId) -> StoreResult<Vec<Offer>> {
            Err(StoreError::backend("offer store offline"))
        }

        fn find_offer(
            &self,
            _product_id: ProductId,
            _supplier_id: SupplierId,
            _catalog_number: CatalogNumber,
        ) -> StoreResult<Option<Offer>> {
            Err(StoreError::backend("offer store offline"))
        }

        fn find_cheapest_offer(&self, _product_id: ProductId) -> StoreResult<Option<Offer>> {
            Err(StoreError::backend("offer store offline"))
        }

        fn insert(&self, _offer: Offer) -> StoreResult<()> {
            Err(StoreError::backend("offer store offline"))
        }

        fn delete_for_agreement(&self, _agreement_id: AgreementId) -> StoreResult<()> {
            Err(StoreError::backend("offer store offline"))
        }
    }

    fn offer(supplier: i64, agreement: i64, product: i64, price: f64) -> Offer {
        Offer::new(
            SupplierId::new(supplier),
            AgreementId::new(agreement),
            ProductId::new(product),
            CatalogNumber::new(supplier * 1000 + product),
            price,
            UnitOfMeasure::Unit,
        )
        .unwrap()
    }

    fn tier(supplier: i64, agreement: i64, product: i64, min_qty: u32, percent: f64) -> DiscountTier {
        DiscountTier::new(
            ProductId::new(product),
            SupplierId::new(supplier),
            AgreementId::new(agreement),
            min_qty,
            percent,
        )
        .unwrap()
    }

    fn resolver(catalog: FixtureCatalog) -> PriceResolver<std::sync::Arc<FixtureCatalog>, std::sync::Arc<FixtureCatalog>> {
        let catalog = std::sync::Arc::new(catalog);
        PriceResolver::new(catalog.clone(), catalog)
    }

    #[test]
    fn single_offer_without_tiers_keeps_listed_price() {
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(1, 1, 100, 7.5)],
            tiers: vec![],
        });

        let line = resolver
            .resolve(ProductId::new(100), 4)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.unit_price, 7.5);
        assert_eq!(line.discount_percent, 0.0);
        assert_eq!(line.total_cost(), 30.0);
    }

    #[test]
    fn unknown_product_is_unresolved_not_an_error() {
        let resolver = resolver(FixtureCatalog {
            offers: vec![],
            tiers: vec![],
        });

        let resolution = resolver.resolve(ProductId::new(404), 3).unwrap();
        assert_eq!(resolution, Resolution::Unresolved(ProductId::new(404)));
    }

    #[test]
    fn discounted_offer_beats_cheaper_list_price() {
        // A (supplier 1, price 10, no tier) vs B (supplier 2, price 12,
        // min qty 10 -> 20% off); quantity 10: A=100, B=96.
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(1, 1, 1, 10.0), offer(2, 2, 1, 12.0)],
            tiers: vec![tier(2, 2, 1, 10, 20.0)],
        });

        let line = resolver
            .resolve(ProductId::new(1), 10)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.supplier_id, SupplierId::new(2));
        assert_eq!(line.unit_price, 12.0);
        assert_eq!(line.discount_percent, 20.0);
        assert_eq!(line.total_cost(), 96.0);
    }

    #[test]
    fn below_threshold_tier_does_not_apply() {
        // Only one offer (supplier 3, price 5, min qty 50 -> 10% off);
        // quantity 5 stays below the threshold.
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(3, 3, 2, 5.0)],
            tiers: vec![tier(3, 3, 2, 50, 10.0)],
        });

        let line = resolver
            .resolve(ProductId::new(2), 5)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.discount_percent, 0.0);
        assert_eq!(line.total_cost(), 25.0);
    }

    #[test]
    fn offer_uses_its_highest_unlocked_threshold() {
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(1, 1, 3, 10.0)],
            tiers: vec![
                tier(1, 1, 3, 5, 5.0),
                tier(1, 1, 3, 20, 15.0),
                tier(1, 1, 3, 100, 40.0),
            ],
        });

        let line = resolver
            .resolve(ProductId::new(3), 30)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.discount_percent, 15.0);
    }

    #[test]
    fn tier_of_another_offer_never_applies() {
        // Supplier 2 has the only qualifying tier; supplier 1's offer must
        // be priced without it.
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(1, 1, 4, 8.0), offer(2, 2, 4, 20.0)],
            tiers: vec![tier(2, 2, 4, 10, 10.0)],
        });

        let line = resolver
            .resolve(ProductId::new(4), 10)
            .unwrap()
            .resolved()
            .unwrap();
        // 8*10 = 80 beats 20*10*0.9 = 180.
        assert_eq!(line.supplier_id, SupplierId::new(1));
        assert_eq!(line.discount_percent, 0.0);
    }

    #[test]
    fn exact_total_cost_tie_prefers_the_discounted_offer() {
        // Both total 80 for quantity 10: supplier 1 lists 8, supplier 2
        // lists 10 with 20% off. Supplier 2 wins despite the higher id.
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(1, 1, 5, 8.0), offer(2, 2, 5, 10.0)],
            tiers: vec![tier(2, 2, 5, 10, 20.0)],
        });

        let line = resolver
            .resolve(ProductId::new(5), 10)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.supplier_id, SupplierId::new(2));
        assert_eq!(line.discount_percent, 20.0);
        assert_eq!(line.total_cost(), 80.0);
    }

    #[test]
    fn remaining_tie_prefers_lower_supplier_id() {
        // Identical discounted totals; supplier 3 wins over supplier 7.
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(7, 7, 6, 10.0), offer(3, 3, 6, 10.0)],
            tiers: vec![tier(7, 7, 6, 5, 10.0), tier(3, 3, 6, 5, 10.0)],
        });

        let line = resolver
            .resolve(ProductId::new(6), 5)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.supplier_id, SupplierId::new(3));
    }

    #[test]
    fn no_tier_path_breaks_unit_price_ties_by_lower_supplier_id() {
        let resolver = resolver(FixtureCatalog {
            offers: vec![offer(9, 9, 7, 4.0), offer(2, 2, 7, 4.0)],
            tiers: vec![],
        });

        let line = resolver
            .resolve(ProductId::new(7), 3)
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(line.supplier_id, SupplierId::new(2));
    }

    #[test]
    fn store_failure_propagates() {
        let resolver = PriceResolver::new(
            OfflineCatalog,
            std::sync::Arc::new(FixtureCatalog {
                offers: vec![],
                tiers: vec![],
            }),
        );

        let err = resolver.resolve(ProductId::new(1), 1).unwrap_err();
        match err {
            StoreError::Backend(msg) => assert!(msg.contains("offline")),
            _ => panic!("Expected backend failure to propagate"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_catalog(product: i64) -> impl Strategy<Value = FixtureCatalog> {
            let offers = prop::collection::vec((1i64..8, 1u32..500), 1..6).prop_map(
                move |raw| {
                    raw.into_iter()
                        .enumerate()
                        .map(|(i, (s, cents))| {
                            // Distinct agreements per offer; prices in whole cents.
                            offer(s, s * 10 + i as i64, product, cents as f64 / 100.0)
                        })
                        .collect::<Vec<_>>()
                },
            );
            let tiers = prop::collection::vec((1i64..8, 1u32..50, 0u32..=100), 0..8);
            (offers, tiers).prop_map(move |(offers, raw_tiers)| {
                let tiers = raw_tiers
                    .into_iter()
                    .filter_map(|(s, q, pct)| {
                        // Attach tiers only to agreements that exist.
                        offers
                            .iter()
                            .find(|o| o.supplier_id() == SupplierId::new(s))
                            .map(|o| {
                                tier(s, o.agreement_id().value(), product, q, pct as f64)
                            })
                    })
                    .collect();
                FixtureCatalog { offers, tiers }
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: resolution is deterministic.
            #[test]
            fn resolve_is_deterministic(
                catalog in arb_catalog(42),
                quantity in 1u32..60,
            ) {
                let catalog = std::sync::Arc::new(catalog);
                let resolver = PriceResolver::new(catalog.clone(), catalog.clone());
                let first = resolver.resolve(ProductId::new(42), quantity).unwrap();
                let second = resolver.resolve(ProductId::new(42), quantity).unwrap();
                prop_assert_eq!(first, second);
            }

            /// Property: the winner's total cost never exceeds any
            /// candidate's total cost (with its own best tier applied).
            #[test]
            fn winner_minimizes_total_cost(
                catalog in arb_catalog(42),
                quantity in 1u32..60,
            ) {
                let catalog = std::sync::Arc::new(catalog);
                let resolver = PriceResolver::new(catalog.clone(), catalog.clone());
                let line = resolver
                    .resolve(ProductId::new(42), quantity)
                    .unwrap()
                    .resolved()
                    .unwrap();

                let qualifying = catalog
                    .find_tiers_for_quantity(ProductId::new(42), quantity)
                    .unwrap();
                for candidate in catalog.find_offers_by_product(ProductId::new(42)).unwrap() {
                    let pct = best_tier_for_offer(
                        &qualifying,
                        candidate.supplier_id(),
                        candidate.agreement_id(),
                        quantity,
                    )
                    .map(|t| t.discount_percent())
                    .unwrap_or(0.0);
                    let candidate_total =
                        candidate.unit_price() * quantity as f64 * (1.0 - pct / 100.0);
                    prop_assert!(line.total_cost() <= candidate_total);
                }
            }
        }
    }
}
