//! Catalog domain module (supplier offers and quantity discount tiers).
//!
//! This crate contains the value objects the pricing engine decides over,
//! their validation boundary, and the pure tier-selection rules. Storage is
//! behind the repository contracts in [`repository`].

pub mod discount;
pub mod offer;
pub mod repository;

pub use discount::{DiscountTier, best_tier_for_offer, best_tier_for_quantity};
pub use offer::{Offer, OfferKey, UnitOfMeasure};
pub use repository::{DiscountRepository, OfferRepository};
