//! Pricing domain module (supplier price/discount resolution).
//!
//! Given one requested `(product, quantity)` pair, the resolver evaluates
//! every known offer together with its best applicable discount tier and
//! picks the lowest total cost. Implemented purely as deterministic domain
//! logic; all reads go through the catalog repository contracts.

pub mod resolution;
pub mod resolver;

pub use resolution::{Resolution, ResolvedLineItem};
pub use resolver::PriceResolver;
