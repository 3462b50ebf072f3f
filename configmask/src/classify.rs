//! Sensitivity classification.

use crate::shape::Attribute;

/// Replacement for every present sensitive value, whatever its type or length.
pub const MASK_TOKEN: &str = "********";

/// Returns `true` if the attribute's metadata marks it sensitive.
///
/// Attributes without a [`FieldDoc`](crate::FieldDoc) are not sensitive.
pub fn is_sensitive<T>(attribute: &Attribute<T>) -> bool {
    attribute.doc().is_some_and(|doc| doc.sensitive)
}
