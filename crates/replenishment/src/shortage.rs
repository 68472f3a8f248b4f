use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use restock_core::ProductId;

/// Weights of the minimum-stock formula.
///
/// `min_required = trunc(demand_weight * demand + supply_time_weight *
/// supply_time_days)`. The fractional part is truncated, not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortagePolicy {
    pub demand_weight: f64,
    pub supply_time_weight: f64,
}

impl Default for ShortagePolicy {
    fn default() -> Self {
        Self {
            demand_weight: 0.5,
            supply_time_weight: 0.5,
        }
    }
}

impl ShortagePolicy {
    /// Minimum stock a product must hold given its demand level and the
    /// days its suppliers need to deliver.
    pub fn min_required(&self, demand: u32, supply_time_days: u32) -> u32 {
        let raw = self.demand_weight * demand as f64
            + self.supply_time_weight * supply_time_days as f64;
        raw.max(0.0) as u32
    }
}

/// Compute the missing quantity per product.
///
/// Considers every product appearing in any of the three maps; absent
/// entries count as zero, so a product that has never been stocked (or
/// never purchased) is still eligible. Only products with a positive
/// missing quantity are returned.
pub fn detect_shortages(
    policy: &ShortagePolicy,
    stock: &BTreeMap<ProductId, u32>,
    demand: &BTreeMap<ProductId, u32>,
    supply_time: &BTreeMap<ProductId, u32>,
) -> BTreeMap<ProductId, u32> {
    let products: BTreeSet<ProductId> = stock
        .keys()
        .chain(demand.keys())
        .chain(supply_time.keys())
        .copied()
        .collect();

    let mut shortages = BTreeMap::new();
    for product_id in products {
        let on_hand = stock.get(&product_id).copied().unwrap_or(0);
        let min_required = policy.min_required(
            demand.get(&product_id).copied().unwrap_or(0),
            supply_time.get(&product_id).copied().unwrap_or(0),
        );
        let missing = min_required.saturating_sub(on_hand);
        if missing > 0 {
            tracing::debug!(
                %product_id,
                on_hand,
                min_required,
                missing,
                "product below minimum stock"
            );
            shortages.insert(product_id, missing);
        }
    }
    shortages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(i64, u32)]) -> BTreeMap<ProductId, u32> {
        entries
            .iter()
            .map(|&(p, q)| (ProductId::new(p), q))
            .collect()
    }

    #[test]
    fn missing_is_min_required_minus_stock() {
        // demand 5, supply time 3, stock 2: min required trunc(2.5+1.5)=4,
        // missing 2.
        let shortages = detect_shortages(
            &ShortagePolicy::default(),
            &map(&[(1, 2)]),
            &map(&[(1, 5)]),
            &map(&[(1, 3)]),
        );
        assert_eq!(shortages, map(&[(1, 2)]));
    }

    #[test]
    fn fractional_minimum_is_truncated() {
        // demand 4, supply time 3: 2.0 + 1.5 = 3.5 -> 3.
        let policy = ShortagePolicy::default();
        assert_eq!(policy.min_required(4, 3), 3);
        assert_eq!(policy.min_required(5, 3), 4);
        assert_eq!(policy.min_required(0, 0), 0);
    }

    #[test]
    fn fully_stocked_products_are_not_reported() {
        let shortages = detect_shortages(
            &ShortagePolicy::default(),
            &map(&[(1, 10)]),
            &map(&[(1, 5)]),
            &map(&[(1, 3)]),
        );
        assert!(shortages.is_empty());
    }

    #[test]
    fn never_stocked_product_is_still_eligible() {
        // No stock entry at all: treated as zero on hand, not skipped.
        let shortages = detect_shortages(
            &ShortagePolicy::default(),
            &BTreeMap::new(),
            &map(&[(7, 6)]),
            &map(&[(7, 4)]),
        );
        assert_eq!(shortages, map(&[(7, 5)]));
    }

    #[test]
    fn products_appear_independently() {
        let shortages = detect_shortages(
            &ShortagePolicy::default(),
            &map(&[(1, 0), (2, 100)]),
            &map(&[(1, 8), (2, 8)]),
            &map(&[(1, 2), (2, 2)]),
        );
        assert_eq!(shortages, map(&[(1, 5)]));
    }
}
