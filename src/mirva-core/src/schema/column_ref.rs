//! Column reference identity.

use serde::{Deserialize, Serialize};

/// Reference to a column, possibly qualified by a table name or alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Optional qualifier (table name or alias).
    pub qualifier: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Create a new unqualified column reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    /// Create a new qualified column reference.
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    /// Parse a column reference from a string.
    ///
    /// Supports formats:
    /// - `"column"` -> unqualified
    /// - `"table.column"` -> qualified
    pub fn parse(s: &str) -> Self {
        if let Some((qualifier, name)) = s.split_once('.') {
            Self::qualified(qualifier, name)
        } else {
            Self::new(s)
        }
    }

    /// Check if this reference is qualified.
    pub const fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }

    /// Get the full display name.
    pub fn display_name(&self) -> String {
        self.qualifier
            .as_ref()
            .map_or_else(|| self.name.clone(), |q| format!("{q}.{}", self.name))
    }

    /// Attribute identity modulo qualifier.
    ///
    /// `t.a` and `a` name the same attribute; the qualifier is cosmetic
    /// wrapping introduced by the analyzer.
    pub fn semantic_eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let unqualified = ColumnRef::parse("name");
        assert!(!unqualified.is_qualified());
        assert_eq!(unqualified.name, "name");

        let qualified = ColumnRef::parse("emp.name");
        assert!(qualified.is_qualified());
        assert_eq!(qualified.qualifier, Some("emp".to_string()));
        assert_eq!(qualified.name, "name");
    }

    #[test]
    fn test_display() {
        assert_eq!(ColumnRef::new("name").display_name(), "name");
        assert_eq!(ColumnRef::qualified("emp", "name").display_name(), "emp.name");
    }

    #[test]
    fn test_semantic_eq_ignores_qualifier() {
        let bare = ColumnRef::new("salary");
        let qualified = ColumnRef::qualified("emp", "salary");
        assert!(bare.semantic_eq(&qualified));
        assert!(!bare.semantic_eq(&ColumnRef::new("dept")));
    }
}
