//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. Constructors are the
/// only place their invariants are checked, so holding one is proof that the
/// invariant holds.
///
/// Example: a `Quantity` of 3 equals any other `Quantity` of 3, while two line
/// items with identical fields are still distinct entities.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
