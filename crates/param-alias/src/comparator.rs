//! Equality predicates over `(original, transformed)` value pairs
//!
//! A comparator decides whether a deprecated-value transform actually
//! changed anything. Only a change produces a deprecation notice.

use std::borrow::Cow;

use serde_json::Value;

/// Boxed comparator as stored by rules.
pub type Comparator<'a> = Box<dyn Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync + 'a>;

/// Default comparator.
///
/// Two absent values are equal; an absent value never equals a present
/// one. Present values are compared with [`values_equivalent`].
pub fn default_equivalent(original: Option<&Value>, transformed: Option<&Value>) -> bool {
    match (original, transformed) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equivalent(a, b),
        _ => false,
    }
}

/// Structural equality, falling back to canonical string form.
///
/// `1` and `"1"` are equivalent; `"peer"` and `"certificate"` are not.
pub fn values_equivalent(a: &Value, b: &Value) -> bool {
    a == b || canonical_string(a) == canonical_string(b)
}

/// String form used when values are not structurally equal.
///
/// Strings render without quotes so they line up with scalars of other types.
pub fn canonical_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
