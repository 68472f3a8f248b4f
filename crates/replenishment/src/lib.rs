//! Replenishment domain module (shortage detection and automatic ordering).
//!
//! Computes, per product, how far current stock sits below its
//! demand/supply-time-derived minimum, then feeds the missing quantities
//! into the order assembler, skipping anything a pending order already
//! covers.

pub mod planner;
pub mod shortage;

pub use planner::{ReplenishmentOutcome, ReplenishmentPlanner};
pub use shortage::{ShortagePolicy, detect_shortages};
