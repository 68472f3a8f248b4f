use serde::{Deserialize, Serialize};

use restock_core::{
    AgreementId, CatalogNumber, DomainError, DomainResult, ProductId, SupplierId, ValueObject,
};

/// Measuring unit a supplier prices a product in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfMeasure {
    Unit,
    Kilogram,
    Liter,
    Pack,
}

/// Business key of an offer: one supplier lists one catalog number per product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferKey {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    pub catalog_number: CatalogNumber,
}

/// Value object: a supplier's priced ability to deliver a product under a
/// specific agreement.
///
/// Multiple offers may exist for the same product from different suppliers
/// or agreements. Offers are owned by the agreement that created them and
/// are deleted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    supplier_id: SupplierId,
    agreement_id: AgreementId,
    product_id: ProductId,
    catalog_number: CatalogNumber,
    unit_price: f64,
    unit: UnitOfMeasure,
}

impl Offer {
    pub fn new(
        supplier_id: SupplierId,
        agreement_id: AgreementId,
        product_id: ProductId,
        catalog_number: CatalogNumber,
        unit_price: f64,
        unit: UnitOfMeasure,
    ) -> DomainResult<Self> {
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(DomainError::validation(format!(
                "unit price must be a positive finite number, got {unit_price}"
            )));
        }
        Ok(Self {
            supplier_id,
            agreement_id,
            product_id,
            catalog_number,
            unit_price,
            unit,
        })
    }

    pub fn key(&self) -> OfferKey {
        OfferKey {
            product_id: self.product_id,
            supplier_id: self.supplier_id,
            catalog_number: self.catalog_number,
        }
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn agreement_id(&self) -> AgreementId {
        self.agreement_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn catalog_number(&self) -> CatalogNumber {
        self.catalog_number
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn unit(&self) -> UnitOfMeasure {
        self.unit
    }
}

impl ValueObject for Offer {}
