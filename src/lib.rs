//! # Termbase - Multilingual Terminology Graph Backend
//!
//! Termbase stores a thesaurus hierarchy as a labeled graph and serves it
//! over HTTP+JSON:
//! - Classes → Subclasses → Terms, linked by `MT` / `HAS_TERMIN` edges
//! - Translation nodes (`ru`/`kz`/`en`) linked via `LE_KAZ` / `LE_ENG`
//! - Synonym nodes linked via the `UF_1` / `UF_2` synonym classes
//! - Symmetric thesaurus relations (`NT`/`BT`/`RT`/`UF`/`SN`/`MT`) between Terms
//!
//! Storage is an embedded SQLite graph; every request runs its own
//! parameterized statements, with multi-statement writes in one transaction.

pub mod config;
pub mod node;
pub mod relation;
pub mod server;
pub mod storage;

// Re-exports for convenient access
pub use node::{Node, NodeKind};
pub use relation::{Edge, RelationKind, SynonymClass, TermRelation};
pub use storage::GraphStore;

/// Result type alias for Termbase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Termbase operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Unknown node kind: {0}")]
    InvalidNodeKind(String),

    #[error("Invalid relation type: {0} (expected one of NT, BT, RT, UF, SN, MT)")]
    InvalidRelation(String),

    #[error("Invalid synonym class: {0} (expected UF_1 or UF_2)")]
    InvalidSynonymClass(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
