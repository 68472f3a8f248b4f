use chrono::Weekday;
use serde::{Deserialize, Serialize};

use restock_core::{AgreementId, DomainError, DomainResult, Entity, SupplierId};

/// Delivery terms of an agreement.
///
/// A supplier either delivers on fixed weekdays or dispatches on demand
/// after an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTerms {
    /// Regular deliveries on the listed weekdays (non-empty).
    FixedDays(Vec<Weekday>),
    /// Delivery is arranged per order, `lead_days` after placement.
    OnDemand { lead_days: u32 },
}

/// Entity: Agreement (a supplier contract the offers hang off).
///
/// Offers and discount tiers are owned by the agreement that created them;
/// deleting an agreement cascades through the offer/tier stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    id: AgreementId,
    supplier_id: SupplierId,
    terms: DeliveryTerms,
}

impl Agreement {
    pub fn new(id: AgreementId, supplier_id: SupplierId, terms: DeliveryTerms) -> DomainResult<Self> {
        if let DeliveryTerms::FixedDays(days) = &terms {
            if days.is_empty() {
                return Err(DomainError::validation(
                    "fixed-day agreement must list at least one delivery day",
                ));
            }
        }
        Ok(Self {
            id,
            supplier_id,
            terms,
        })
    }

    pub fn id_typed(&self) -> AgreementId {
        self.id
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn terms(&self) -> &DeliveryTerms {
        &self.terms
    }
}

impl Entity for Agreement {
    type Id = AgreementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
