//! Relation kinds - typed edges of the terminology graph
//!
//! Three families share one edge table:
//! - hierarchy: `MT` (Class → Subclass), `HAS_TERMIN` (Subclass → Term)
//! - variants: `LE_KAZ` / `LE_ENG` to Translations, `UF_1` / `UF_2` to Synonyms
//! - thesaurus: `NT`/`BT`/`RT`/`UF`/`SN`/`MT` between Terms, always written
//!   as a symmetric pair
//!
//! The distinction between `UF_1` and `UF_2`, and between the thesaurus
//! types, is deliberately opaque: they are enumerants with wire names and
//! nothing more.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every edge type the store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Hierarchical containment (also a symmetric thesaurus relation)
    #[serde(rename = "MT")]
    Mt,
    /// Subclass → Term containment
    #[serde(rename = "HAS_TERMIN")]
    HasTermin,
    /// Primary node → Kazakh translation
    #[serde(rename = "LE_KAZ")]
    LeKaz,
    /// Primary node → English translation
    #[serde(rename = "LE_ENG")]
    LeEng,
    /// Term → Synonym, first synonym class
    #[serde(rename = "UF_1")]
    Uf1,
    /// Term → Synonym, second synonym class
    #[serde(rename = "UF_2")]
    Uf2,
    /// Narrower-term analogue
    #[serde(rename = "NT")]
    Nt,
    /// Broader-term analogue
    #[serde(rename = "BT")]
    Bt,
    /// Related-term analogue
    #[serde(rename = "RT")]
    Rt,
    /// Used-for analogue
    #[serde(rename = "UF")]
    Uf,
    /// Scope-note analogue
    #[serde(rename = "SN")]
    Sn,
}

impl RelationKind {
    /// Wire/storage name of the relation
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Mt => "MT",
            RelationKind::HasTermin => "HAS_TERMIN",
            RelationKind::LeKaz => "LE_KAZ",
            RelationKind::LeEng => "LE_ENG",
            RelationKind::Uf1 => "UF_1",
            RelationKind::Uf2 => "UF_2",
            RelationKind::Nt => "NT",
            RelationKind::Bt => "BT",
            RelationKind::Rt => "RT",
            RelationKind::Uf => "UF",
            RelationKind::Sn => "SN",
        }
    }

    /// Get all relation kinds
    pub fn all() -> &'static [RelationKind] {
        &[
            RelationKind::Mt,
            RelationKind::HasTermin,
            RelationKind::LeKaz,
            RelationKind::LeEng,
            RelationKind::Uf1,
            RelationKind::Uf2,
            RelationKind::Nt,
            RelationKind::Bt,
            RelationKind::Rt,
            RelationKind::Uf,
            RelationKind::Sn,
        ]
    }
}

impl FromStr for RelationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MT" => Ok(RelationKind::Mt),
            "HAS_TERMIN" => Ok(RelationKind::HasTermin),
            "LE_KAZ" => Ok(RelationKind::LeKaz),
            "LE_ENG" => Ok(RelationKind::LeEng),
            "UF_1" => Ok(RelationKind::Uf1),
            "UF_2" => Ok(RelationKind::Uf2),
            "NT" => Ok(RelationKind::Nt),
            "BT" => Ok(RelationKind::Bt),
            "RT" => Ok(RelationKind::Rt),
            "UF" => Ok(RelationKind::Uf),
            "SN" => Ok(RelationKind::Sn),
            _ => Err(Error::InvalidRelation(s.to_string())),
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allow-list of relation types a client may create between two Terms.
/// Anything outside this set is rejected before any write happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermRelation {
    #[serde(rename = "NT")]
    Nt,
    #[serde(rename = "BT")]
    Bt,
    #[serde(rename = "RT")]
    Rt,
    #[serde(rename = "UF")]
    Uf,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "MT")]
    Mt,
}

impl TermRelation {
    /// The stored edge kind this relation maps to
    pub fn relation_kind(&self) -> RelationKind {
        match self {
            TermRelation::Nt => RelationKind::Nt,
            TermRelation::Bt => RelationKind::Bt,
            TermRelation::Rt => RelationKind::Rt,
            TermRelation::Uf => RelationKind::Uf,
            TermRelation::Sn => RelationKind::Sn,
            TermRelation::Mt => RelationKind::Mt,
        }
    }

    /// Get all allowed term relations
    pub fn all() -> &'static [TermRelation] {
        &[
            TermRelation::Nt,
            TermRelation::Bt,
            TermRelation::Rt,
            TermRelation::Uf,
            TermRelation::Sn,
            TermRelation::Mt,
        ]
    }
}

impl FromStr for TermRelation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NT" => Ok(TermRelation::Nt),
            "BT" => Ok(TermRelation::Bt),
            "RT" => Ok(TermRelation::Rt),
            "UF" => Ok(TermRelation::Uf),
            "SN" => Ok(TermRelation::Sn),
            "MT" => Ok(TermRelation::Mt),
            _ => Err(Error::InvalidRelation(s.to_string())),
        }
    }
}

impl std::fmt::Display for TermRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relation_kind())
    }
}

/// Which of the two synonym link classes a synonym attaches under.
/// No further semantic difference is defined between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynonymClass {
    #[serde(rename = "UF_1")]
    Uf1,
    #[serde(rename = "UF_2")]
    Uf2,
}

impl SynonymClass {
    /// The stored edge kind this synonym class maps to
    pub fn relation_kind(&self) -> RelationKind {
        match self {
            SynonymClass::Uf1 => RelationKind::Uf1,
            SynonymClass::Uf2 => RelationKind::Uf2,
        }
    }
}

impl FromStr for SynonymClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UF_1" => Ok(SynonymClass::Uf1),
            "UF_2" => Ok(SynonymClass::Uf2),
            _ => Err(Error::InvalidSynonymClass(s.to_string())),
        }
    }
}

/// An edge between two nodes, identified by store-assigned node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub from: i64,
    /// Target node id
    pub to: i64,
    /// Edge type
    pub kind: RelationKind,
}

impl Edge {
    pub fn new(from: i64, to: i64, kind: RelationKind) -> Self {
        Self { from, to, kind }
    }

    /// The opposite-direction edge of the same kind
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_kind_roundtrip() {
        for kind in RelationKind::all() {
            let s = kind.as_str();
            let parsed: RelationKind = s.parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_term_relation_allow_list() {
        for rel in TermRelation::all() {
            let name = rel.relation_kind().as_str();
            let parsed: TermRelation = name.parse().unwrap();
            assert_eq!(*rel, parsed);
        }

        // hierarchy/variant kinds are not creatable between terms
        assert!("HAS_TERMIN".parse::<TermRelation>().is_err());
        assert!("LE_KAZ".parse::<TermRelation>().is_err());
        assert!("UF_1".parse::<TermRelation>().is_err());
        assert!("XX".parse::<TermRelation>().is_err());
    }

    #[test]
    fn test_synonym_class() {
        assert_eq!(
            "UF_1".parse::<SynonymClass>().unwrap().relation_kind(),
            RelationKind::Uf1
        );
        assert_eq!(
            "UF_2".parse::<SynonymClass>().unwrap().relation_kind(),
            RelationKind::Uf2
        );
        assert!("UF_3".parse::<SynonymClass>().is_err());
    }

    #[test]
    fn test_edge_reversed() {
        let edge = Edge::new(1, 2, RelationKind::Rt);
        let back = edge.reversed();
        assert_eq!(back.from, 2);
        assert_eq!(back.to, 1);
        assert_eq!(back.kind, RelationKind::Rt);
    }
}
