//! Collaborator contracts for supplier/agreement lookups.
//!
//! Consumed only to enrich a finished order with display metadata
//! (supplier name, delivery terms), never by the price decision.

use std::sync::Arc;

use restock_core::{AgreementId, StoreResult, SupplierId};

use crate::agreement::Agreement;
use crate::supplier::Supplier;

/// Read/write contract for suppliers.
pub trait SupplierRepository: Send + Sync {
    fn find_by_id(&self, supplier_id: SupplierId) -> StoreResult<Option<Supplier>>;
    fn upsert(&self, supplier: Supplier) -> StoreResult<()>;
}

/// Read/write contract for agreements.
pub trait AgreementRepository: Send + Sync {
    fn find_by_id(&self, agreement_id: AgreementId) -> StoreResult<Option<Agreement>>;
    fn find_by_supplier(&self, supplier_id: SupplierId) -> StoreResult<Vec<Agreement>>;
    fn upsert(&self, agreement: Agreement) -> StoreResult<()>;
}

impl<S> SupplierRepository for Arc<S>
where
    S: SupplierRepository + ?Sized,
{
    fn find_by_id(&self, supplier_id: SupplierId) -> StoreResult<Option<Supplier>> {
        (**self).find_by_id(supplier_id)
    }

    fn upsert(&self, supplier: Supplier) -> StoreResult<()> {
        (**self).upsert(supplier)
    }
}

impl<S> AgreementRepository for Arc<S>
where
    S: AgreementRepository + ?Sized,
{
    fn find_by_id(&self, agreement_id: AgreementId) -> StoreResult<Option<Agreement>> {
        (**self).find_by_id(agreement_id)
    }

    fn find_by_supplier(&self, supplier_id: SupplierId) -> StoreResult<Vec<Agreement>> {
        (**self).find_by_supplier(supplier_id)
    }

    fn upsert(&self, agreement: Agreement) -> StoreResult<()> {
        (**self).upsert(agreement)
    }
}
