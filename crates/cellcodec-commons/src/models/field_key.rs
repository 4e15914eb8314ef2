//! Column identity used as a registry key.

use std::fmt;

use crate::conversions::to_string_binary;

/// Identifies a field by `(family, qualifier)`.
///
/// A `None` qualifier is the wildcard "any qualifier in this family", used for
/// family-level defaults. Equality and hashing compare the raw bytes of both
/// parts, never references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    family: Vec<u8>,
    qualifier: Option<Vec<u8>>,
}

impl FieldKey {
    pub fn new(family: impl Into<Vec<u8>>, qualifier: Option<Vec<u8>>) -> Self {
        Self {
            family: family.into(),
            qualifier,
        }
    }

    /// Exact column key.
    pub fn column(family: &[u8], qualifier: &[u8]) -> Self {
        Self::new(family.to_vec(), Some(qualifier.to_vec()))
    }

    /// Family-level wildcard key.
    pub fn family(family: &[u8]) -> Self {
        Self::new(family.to_vec(), None)
    }

    pub fn family_bytes(&self) -> &[u8] {
        &self.family
    }

    pub fn qualifier_bytes(&self) -> Option<&[u8]> {
        self.qualifier.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.qualifier.is_none()
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}:{}", to_string_binary(&self.family), to_string_binary(q)),
            None => write!(f, "{}:*", to_string_binary(&self.family)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_by_content() {
        let family = b"d".to_vec();
        let a = FieldKey::column(&family, b"temp");
        let b = FieldKey::column(b"d", &b"temp".to_vec());
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn test_wildcard_is_distinct_from_empty_qualifier() {
        let wildcard = FieldKey::family(b"d");
        let empty = FieldKey::column(b"d", b"");
        assert!(wildcard.is_wildcard());
        assert!(!empty.is_wildcard());
        assert_ne!(wildcard, empty);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldKey::column(b"d", b"t\x01").to_string(), "d:t\\x01");
        assert_eq!(FieldKey::family(b"d").to_string(), "d:*");
    }
}
