use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Utc;
use thiserror::Error;

use restock_catalog::{DiscountRepository, OfferRepository};
use restock_core::{AgreementId, DomainError, OrderId, ProductId, StoreError, SupplierId};
use restock_pricing::{PriceResolver, Resolution, ResolvedLineItem};
use restock_suppliers::{AgreementRepository, DeliveryTerms, SupplierRepository};

use crate::order::{Order, OrderLine};
use crate::repository::OrderRepository;

/// Failure of one `build_order` call.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Every requested product was unresolved, so nothing to persist. Fatal
    /// to this build call only; the caller decides whether to retry.
    #[error("no requested product could be resolved to a supplier offer")]
    EmptyOrder,

    /// The order store (or an enrichment lookup) failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The assembled order violated a domain invariant.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Display metadata for one winning supplier/agreement pair, resolved after
/// the price decision purely for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierDetail {
    pub supplier_id: SupplierId,
    pub agreement_id: AgreementId,
    pub name: Option<String>,
    pub terms: Option<DeliveryTerms>,
}

/// Result of a successful `build_order` call.
#[derive(Debug)]
pub struct OrderBuild {
    pub order_id: OrderId,
    pub order: Order,
    /// The priced line items behind the order lines.
    pub pricing: Vec<ResolvedLineItem>,
    /// Products no supplier offers. Reported, never fatal.
    pub unresolved: Vec<ProductId>,
    /// Products whose resolution hit a store failure. The failure is
    /// carried per product; the rest of the batch went through.
    pub failed: Vec<(ProductId, StoreError)>,
    pub supplier_details: Vec<SupplierDetail>,
}

/// Order assembler.
///
/// Runs the price resolver over a whole requested-products map and emits
/// one persistable order tagging every line with its chosen supplier. Both
/// call paths (interactive ordering and automatic shortage replenishment)
/// go through here.
pub struct OrderAssembler<O, D, R, S, A> {
    resolver: PriceResolver<O, D>,
    orders: R,
    suppliers: S,
    agreements: A,
}

impl<O, D, R, S, A> OrderAssembler<O, D, R, S, A>
where
    O: OfferRepository,
    D: DiscountRepository,
    R: OrderRepository,
    S: SupplierRepository,
    A: AgreementRepository,
{
    pub fn new(resolver: PriceResolver<O, D>, orders: R, suppliers: S, agreements: A) -> Self {
        Self {
            resolver,
            orders,
            suppliers,
            agreements,
        }
    }

    /// Build and persist one order for the requested quantities.
    ///
    /// Zero-quantity entries are dropped before resolution. Unresolved
    /// products and per-product store failures are collected and reported;
    /// neither aborts the remaining entries. The order itself is written
    /// through a single `save`.
    pub fn build_order(
        &self,
        requested: &BTreeMap<ProductId, u32>,
        requester_ref: &str,
    ) -> Result<OrderBuild, AssembleError> {
        let mut pricing = Vec::new();
        let mut unresolved = Vec::new();
        let mut failed = Vec::new();

        for (&product_id, &quantity) in requested {
            if quantity == 0 {
                continue;
            }
            match self.resolver.resolve(product_id, quantity) {
                Ok(Resolution::Resolved(line)) => pricing.push(line),
                Ok(Resolution::Unresolved(product_id)) => {
                    tracing::warn!(%product_id, "requested product has no supplier offer");
                    unresolved.push(product_id);
                }
                Err(err) => {
                    tracing::error!(%product_id, error = %err, "resolution failed for product");
                    failed.push((product_id, err));
                }
            }
        }

        if pricing.is_empty() {
            // A store failure must surface as one even when it sank the
            // whole batch; `EmptyOrder` is reserved for unresolved products.
            if !failed.is_empty() {
                let (product_id, err) = failed.remove(0);
                tracing::error!(%product_id, error = %err, "no product resolved, propagating store failure");
                return Err(AssembleError::Store(err));
            }
            return Err(AssembleError::EmptyOrder);
        }

        let lines: Vec<OrderLine> = pricing
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                supplier_id: line.supplier_id,
                quantity: line.quantity,
            })
            .collect();

        let order = Order::new(OrderId::new(), requester_ref, Utc::now(), lines)?;
        let order_id = self.orders.save(order.clone())?;
        tracing::info!(
            %order_id,
            lines = order.lines().len(),
            unresolved = unresolved.len(),
            "order persisted"
        );

        let supplier_details = self.enrich(&pricing)?;

        Ok(OrderBuild {
            order_id,
            order,
            pricing,
            unresolved,
            failed,
            supplier_details,
        })
    }

    /// Supplier name and delivery terms for each winning offer; display
    /// only, resolved after the decision.
    fn enrich(&self, pricing: &[ResolvedLineItem]) -> Result<Vec<SupplierDetail>, StoreError> {
        let pairs: BTreeSet<(SupplierId, AgreementId)> = pricing
            .iter()
            .map(|line| (line.supplier_id, line.agreement_id))
            .collect();

        let mut details = Vec::with_capacity(pairs.len());
        for (supplier_id, agreement_id) in pairs {
            let name = self
                .suppliers
                .find_by_id(supplier_id)?
                .map(|s| s.name().to_string());
            let terms = self
                .agreements
                .find_by_id(agreement_id)?
                .map(|a| a.terms().clone());
            details.push(SupplierDetail {
                supplier_id,
                agreement_id,
                name,
                terms,
            });
        }
        Ok(details)
    }
}
