//! Supplier domain module (suppliers and their agreements).
//!
//! This crate contains the supplier-side entities consumed for order
//! enrichment (names, delivery days). Nothing here participates in the
//! price decision itself.

pub mod agreement;
pub mod repository;
pub mod supplier;

pub use agreement::{Agreement, DeliveryTerms};
pub use repository::{AgreementRepository, SupplierRepository};
pub use supplier::{ContactInfo, Supplier};
