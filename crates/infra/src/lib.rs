//! Infrastructure layer: in-memory stores, caching, config.
//!
//! In-memory implementations of every collaborator contract (intended for
//! tests/dev and as the reference semantics for real backends), plus a
//! bounded read cache for the hot offer-lookup path.

pub mod cache;
pub mod store;


pub use cache::{CacheConfig, CachedOfferStore};
pub use store::{
    InMemoryAgreementStore, InMemoryDiscountStore, InMemoryOfferStore, InMemoryOrderStore,
    InMemorySupplierStore,
};
