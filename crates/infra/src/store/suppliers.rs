use std::collections::HashMap;
use std::sync::RwLock;

use restock_core::{AgreementId, StoreError, StoreResult, SupplierId};
use restock_suppliers::{Agreement, AgreementRepository, Supplier, SupplierRepository};

/// In-memory supplier store.
#[derive(Debug, Default)]
pub struct InMemorySupplierStore {
    inner: RwLock<HashMap<SupplierId, Supplier>>,
}

impl InMemorySupplierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SupplierRepository for InMemorySupplierStore {
    fn find_by_id(&self, supplier_id: SupplierId) -> StoreResult<Option<Supplier>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&supplier_id).cloned())
    }

    fn upsert(&self, supplier: Supplier) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(supplier.id_typed(), supplier);
        Ok(())
    }
}

/// In-memory agreement store.
#[derive(Debug, Default)]
pub struct InMemoryAgreementStore {
    inner: RwLock<HashMap<AgreementId, Agreement>>,
}

impl InMemoryAgreementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AgreementRepository for InMemoryAgreementStore {
    fn find_by_id(&self, agreement_id: AgreementId) -> StoreResult<Option<Agreement>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&agreement_id).cloned())
    }

    fn find_by_supplier(&self, supplier_id: SupplierId) -> StoreResult<Vec<Agreement>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut agreements: Vec<Agreement> = map
            .values()
            .filter(|a| a.supplier_id() == supplier_id)
            .cloned()
            .collect();
        agreements.sort_by_key(|a| a.id_typed());
        Ok(agreements)
    }

    fn upsert(&self, agreement: Agreement) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(agreement.id_typed(), agreement);
        Ok(())
    }
}
