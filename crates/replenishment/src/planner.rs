use std::collections::{BTreeMap, BTreeSet};

use restock_catalog::{DiscountRepository, OfferRepository};
use restock_core::ProductId;
use restock_purchasing::{AssembleError, OrderAssembler, OrderBuild, OrderRepository};
use restock_suppliers::{AgreementRepository, SupplierRepository};

use crate::shortage::{ShortagePolicy, detect_shortages};

/// Outcome of one replenishment run.
#[derive(Debug)]
pub enum ReplenishmentOutcome {
    /// Shortages existed and an order was placed.
    Ordered(OrderBuild),
    /// Stock is fine (or every shortage is already covered by a pending
    /// order). Not an error.
    NothingToOrder,
}

/// Automatic shortage-replenishment trigger.
///
/// The second call path into the order assembler: instead of a manually
/// entered request map, the quantities come from the shortage detector,
/// minus whatever a pending order already covers.
pub struct ReplenishmentPlanner<O, D, R, S, A, P> {
    policy: ShortagePolicy,
    assembler: OrderAssembler<O, D, R, S, A>,
    orders: P,
}

impl<O, D, R, S, A, P> ReplenishmentPlanner<O, D, R, S, A, P>
where
    O: OfferRepository,
    D: DiscountRepository,
    R: OrderRepository,
    S: SupplierRepository,
    A: AgreementRepository,
    P: OrderRepository,
{
    pub fn new(policy: ShortagePolicy, assembler: OrderAssembler<O, D, R, S, A>, orders: P) -> Self {
        Self {
            policy,
            assembler,
            orders,
        }
    }

    /// Detect shortages and order the uncovered ones.
    pub fn run(
        &self,
        stock: &BTreeMap<ProductId, u32>,
        demand: &BTreeMap<ProductId, u32>,
        supply_time: &BTreeMap<ProductId, u32>,
        requester_ref: &str,
    ) -> Result<ReplenishmentOutcome, AssembleError> {
        let shortages = detect_shortages(&self.policy, stock, demand, supply_time);
        if shortages.is_empty() {
            tracing::info!("no products below minimum stock");
            return Ok(ReplenishmentOutcome::NothingToOrder);
        }

        let mut covered = BTreeSet::new();
        for order in self.orders.find_pending()? {
            covered.extend(order.product_ids());
        }
        let to_order = subtract_covered(shortages, &covered);
        if to_order.is_empty() {
            tracing::info!("every shortage is already covered by a pending order");
            return Ok(ReplenishmentOutcome::NothingToOrder);
        }

        tracing::info!(products = to_order.len(), "placing shortage order");
        let build = self.assembler.build_order(&to_order, requester_ref)?;
        Ok(ReplenishmentOutcome::Ordered(build))
    }
}

/// Drop shortages a pending order already covers.
fn subtract_covered(
    shortages: BTreeMap<ProductId, u32>,
    covered: &BTreeSet<ProductId>,
) -> BTreeMap<ProductId, u32> {
    shortages
        .into_iter()
        .filter(|(product_id, _)| !covered.contains(product_id))
        .collect()
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
    fn covered_products_are_skipped() {
        let shortages = map(&[(1, 5), (2, 3), (3, 8)]);
        let covered: BTreeSet<ProductId> = [ProductId::new(2)].into_iter().collect();
        assert_eq!(
            subtract_covered(shortages, &covered),
            map(&[(1, 5), (3, 8)])
        );
    }

    #[test]
    fn nothing_covered_passes_through() {
        let shortages = map(&[(1, 5)]);
        assert_eq!(
            subtract_covered(shortages.clone(), &BTreeSet::new()),
            shortages
        );
    }
}
