//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined
//! entirely by their attribute values. An offer, a discount tier and a resolved
//! line item are all values: two tiers with the same threshold and percent are
//! interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values. The trait requires:
/// - **Clone**: values are cheap to copy around the resolution pipeline
/// - **PartialEq**: compared by attribute values
/// - **Debug**: loggable in decision traces and tests
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
