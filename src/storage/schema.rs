//! Database schema definitions

/// SQL to create the nodes table
pub const CREATE_NODES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    name TEXT NOT NULL,
    lang TEXT NOT NULL,
    UNIQUE(kind, name, lang)
)
"#;

/// SQL to create the edges table
pub const CREATE_EDGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_id INTEGER NOT NULL REFERENCES nodes(id),
    to_id INTEGER NOT NULL REFERENCES nodes(id),
    kind TEXT NOT NULL,
    UNIQUE(from_id, to_id, kind)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_nodes_kind ON nodes(kind)",
    "CREATE INDEX IF NOT EXISTS idx_nodes_name ON nodes(name, lang)",
    "CREATE INDEX IF NOT EXISTS idx_edges_from ON edges(from_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_to ON edges(to_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_kind ON edges(kind)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_NODES_TABLE, CREATE_EDGES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
