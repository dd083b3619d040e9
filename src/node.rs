//! Node kinds - the label partition of the terminology graph
//!
//! Every node carries exactly one label:
//! - `Class`: top of the hierarchy
//! - `Subclass`: mid-level grouping
//! - `Term`: leaf terminology entry
//! - `Translation`: language variant of a primary node
//! - `Synonym`: alternate form of a Term
//!
//! The wire and storage representation is the original Russian label
//! (`Класс`, `Подкласс`, ...); `group()` gives the English display category
//! used by the graph dump.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of node labels. Kinds only ever reach SQL through
/// [`NodeKind::as_label`]; request strings are parsed, never interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Top-level hierarchy node
    #[serde(rename = "Класс")]
    Class,
    /// Mid-level grouping under a Class
    #[serde(rename = "Подкласс")]
    Subclass,
    /// Leaf terminology entry under a Subclass
    #[serde(rename = "Термин")]
    Term,
    /// Language variant (`ru`/`kz`/`en`) of a primary node or synonym
    #[serde(rename = "Перевод")]
    Translation,
    /// Alternate form of a Term
    #[serde(rename = "Синоним")]
    Synonym,
}

impl NodeKind {
    /// The label string stored in the database and accepted on the wire
    pub fn as_label(&self) -> &'static str {
        match self {
            NodeKind::Class => "Класс",
            NodeKind::Subclass => "Подкласс",
            NodeKind::Term => "Термин",
            NodeKind::Translation => "Перевод",
            NodeKind::Synonym => "Синоним",
        }
    }

    /// English display category for graph dumps
    pub fn group(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Subclass => "subclass",
            NodeKind::Term => "term",
            NodeKind::Translation => "translate",
            NodeKind::Synonym => "synonym",
        }
    }

    /// Get all node kinds
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Class,
            NodeKind::Subclass,
            NodeKind::Term,
            NodeKind::Translation,
            NodeKind::Synonym,
        ]
    }

    /// Whether this kind sits in the Class/Subclass/Term hierarchy
    pub fn is_primary(&self) -> bool {
        matches!(self, NodeKind::Class | NodeKind::Subclass | NodeKind::Term)
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Класс" => Ok(NodeKind::Class),
            "Подкласс" => Ok(NodeKind::Subclass),
            "Термин" => Ok(NodeKind::Term),
            "Перевод" => Ok(NodeKind::Translation),
            "Синоним" => Ok(NodeKind::Synonym),
            _ => Err(Error::InvalidNodeKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A node row in the terminology graph.
///
/// Identity is the `(kind, name, lang)` triple; `id` is assigned by the
/// store and only meaningful within one database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned row id
    pub id: i64,
    /// Node label
    pub kind: NodeKind,
    /// Display name (unique per kind and language)
    pub name: String,
    /// Language code: `ru`, `kz` or `en`
    pub lang: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_roundtrip() {
        for kind in NodeKind::all() {
            let label = kind.as_label();
            let parsed: NodeKind = label.parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = "Категория".parse::<NodeKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidNodeKind(_)));
    }

    #[test]
    fn test_serde_uses_russian_labels() {
        let json = serde_json::to_string(&NodeKind::Class).unwrap();
        assert_eq!(json, "\"Класс\"");

        let kind: NodeKind = serde_json::from_str("\"Термин\"").unwrap();
        assert_eq!(kind, NodeKind::Term);
    }

    #[test]
    fn test_groups() {
        assert_eq!(NodeKind::Class.group(), "class");
        assert_eq!(NodeKind::Translation.group(), "translate");
        assert!(NodeKind::Term.is_primary());
        assert!(!NodeKind::Synonym.is_primary());
    }
}
