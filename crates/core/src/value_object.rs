//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are never mutated after construction:
/// no `&mut self` methods, no public fields. To "change" one, build a new one.
/// The bounds keep them cheap to copy around, comparable and loggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
