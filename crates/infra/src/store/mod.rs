//! In-memory store implementations.
//!
//! Each store keeps a `RwLock<HashMap>` keyed by the entity's business key.
//! A poisoned lock surfaces as [`restock_core::StoreError::Poisoned`],
//! never a panic.

pub mod catalog;
pub mod orders;
pub mod suppliers;

pub use catalog::{InMemoryDiscountStore, InMemoryOfferStore};
pub use orders::InMemoryOrderStore;
pub use suppliers::{InMemoryAgreementStore, InMemorySupplierStore};
