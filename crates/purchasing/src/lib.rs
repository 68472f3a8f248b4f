//! Purchasing domain module (supplier orders and their assembly).
//!
//! This crate turns a requested-products map into a persistable order: each
//! entry is priced by the resolution engine, winning line items are
//! collected into one immutable [`Order`], and products no supplier can
//! provide are reported back instead of failing the batch.

pub mod assembler;
pub mod order;
pub mod repository;

pub use assembler::{AssembleError, OrderAssembler, OrderBuild, SupplierDetail};
pub use order::{Order, OrderLine, OrderStatus};
pub use repository::OrderRepository;
