//! Storage Layer - SQLite-backed terminology graph
//!
//! System of record is SQLite with tables:
//! - nodes(id, kind, name, lang) with identity UNIQUE(kind, name, lang)
//! - edges(from_id, to_id, kind) with UNIQUE(from_id, to_id, kind)
//!
//! All query contracts of the thesaurus (merge-by-match upserts, one-hop
//! traversals, symmetric relation pairs, cascading deletes, full dumps)
//! are parameterized SQL over these two tables.

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, GraphDump, GraphStore, NewNode, NewSynonym};
