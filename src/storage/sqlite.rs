//! SQLite graph store implementation

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use super::schema;
use crate::node::{Node, NodeKind};
use crate::relation::{Edge, RelationKind, SynonymClass, TermRelation};
use crate::{Error, Result};

/// Primary nodes and synonyms are created in the base language; kz/en
/// variants hang off them as Translation nodes.
const BASE_LANG: &str = "ru";

/// SQLite-backed store for the terminology graph
pub struct GraphStore {
    conn: Connection,
}

/// Payload for creating a primary node with optional translations and parent
#[derive(Debug, Clone)]
pub struct NewNode {
    pub kind: NodeKind,
    pub ru: String,
    pub kz: Option<String>,
    pub en: Option<String>,
    pub parent: Option<String>,
}

/// Payload for attaching a synonym (with optional translations) to a Term
#[derive(Debug, Clone)]
pub struct NewSynonym {
    pub term: String,
    pub synonym: String,
    pub kz: Option<String>,
    pub en: Option<String>,
    pub class: SynonymClass,
}

impl GraphStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Node Operations ==========

    /// Insert a node if its `(kind, name, lang)` identity is new; either way
    /// return its id. Merge-by-match, never a duplicate.
    pub fn upsert_node(&self, kind: NodeKind, name: &str, lang: &str) -> Result<i64> {
        upsert_node(&self.conn, kind, name, lang)
    }

    /// Look up a node id by its full identity
    pub fn node_id(&self, kind: NodeKind, name: &str, lang: &str) -> Result<Option<i64>> {
        node_id(&self.conn, kind, name, lang)
    }

    /// Label-free lookup by `(name, lang)`, used for parent resolution
    pub fn find_by_name(&self, name: &str, lang: &str) -> Result<Option<Node>> {
        find_by_name(&self.conn, name, lang)
    }

    /// List all node names of a kind; empty is a valid result
    pub fn list_names(&self, kind: NodeKind) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM nodes WHERE kind = ?1 ORDER BY name")?;

        let names = stmt
            .query_map([kind.as_label()], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(names)
    }

    /// One-hop traversal: names of `child_kind` children reached from the
    /// named parent over a single edge type. A nonexistent parent simply
    /// has no children.
    pub fn children(
        &self,
        parent_kind: NodeKind,
        parent_name: &str,
        edge: RelationKind,
        child_kind: NodeKind,
    ) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name FROM nodes p
             JOIN edges e ON e.from_id = p.id
             JOIN nodes c ON c.id = e.to_id
             WHERE p.kind = ?1 AND p.name = ?2 AND p.lang = ?3
               AND e.kind = ?4 AND c.kind = ?5
             ORDER BY c.name",
        )?;

        let names = stmt
            .query_map(
                params![
                    parent_kind.as_label(),
                    parent_name,
                    BASE_LANG,
                    edge.as_str(),
                    child_kind.as_label()
                ],
                |row| row.get(0),
            )?
            .filter_map(|r| r.ok())
            .collect();

        Ok(names)
    }

    // ========== Edge Operations ==========

    /// Insert an edge if it is new. Merge-by-match on `(from, to, kind)`.
    pub fn link(&self, from: i64, to: i64, kind: RelationKind) -> Result<()> {
        link(&self.conn, from, to, kind)
    }

    /// All edges leaving a node
    pub fn edges_from(&self, from: i64) -> Result<Vec<Edge>> {
        let mut stmt = self
            .conn
            .prepare("SELECT to_id, kind FROM edges WHERE from_id = ?1")?;

        let mut edges = Vec::new();
        let rows = stmt.query_map([from], |row| {
            let to: i64 = row.get(0)?;
            let kind: String = row.get(1)?;
            Ok((to, kind))
        })?;
        for row in rows {
            let (to, kind) = row?;
            edges.push(Edge::new(from, to, parse_relation(&kind)?));
        }
        Ok(edges)
    }

    // ========== Write Operations ==========

    /// Create a primary node with its translations and parent link in one
    /// transaction: upsert the base-language node, upsert and link kz/en
    /// Translation nodes when supplied, and link parent→child when a parent
    /// name is supplied (`MT` into Class/Subclass children, `HAS_TERMIN`
    /// otherwise). All-or-nothing.
    pub fn create_node(&mut self, node: &NewNode) -> Result<()> {
        let tx = self.conn.transaction()?;

        let id = upsert_node(&tx, node.kind, &node.ru, BASE_LANG)?;

        if let Some(kz) = &node.kz {
            let kz_id = upsert_node(&tx, NodeKind::Translation, kz, "kz")?;
            link(&tx, id, kz_id, RelationKind::LeKaz)?;
        }

        if let Some(en) = &node.en {
            let en_id = upsert_node(&tx, NodeKind::Translation, en, "en")?;
            link(&tx, id, en_id, RelationKind::LeEng)?;
        }

        if let Some(parent) = &node.parent {
            let parent_id = find_by_name(&tx, parent, BASE_LANG)?
                .ok_or_else(|| Error::NodeNotFound(parent.clone()))?
                .id;

            let edge = match node.kind {
                NodeKind::Class | NodeKind::Subclass => RelationKind::Mt,
                _ => RelationKind::HasTermin,
            };
            link(&tx, parent_id, id, edge)?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Create a symmetric thesaurus relation between two Terms: the edge
    /// pair A→B and B→A of the same type, in one transaction. Both Terms
    /// must already exist.
    pub fn create_term_relation(
        &mut self,
        term1: &str,
        term2: &str,
        relation: TermRelation,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;

        let a = node_id(&tx, NodeKind::Term, term1, BASE_LANG)?
            .ok_or_else(|| Error::NodeNotFound(term1.to_string()))?;
        let b = node_id(&tx, NodeKind::Term, term2, BASE_LANG)?
            .ok_or_else(|| Error::NodeNotFound(term2.to_string()))?;

        let kind = relation.relation_kind();
        link(&tx, a, b, kind)?;
        link(&tx, b, a, kind)?;

        tx.commit()?;
        Ok(())
    }

    /// Attach a synonym to a Term in one transaction: upsert the Synonym
    /// node, link its kz/en translations when supplied, then link the
    /// owning Term via the requested synonym class.
    pub fn add_synonym(&mut self, synonym: &NewSynonym) -> Result<()> {
        let tx = self.conn.transaction()?;

        let term_id = node_id(&tx, NodeKind::Term, &synonym.term, BASE_LANG)?
            .ok_or_else(|| Error::NodeNotFound(synonym.term.clone()))?;

        let syn_id = upsert_node(&tx, NodeKind::Synonym, &synonym.synonym, BASE_LANG)?;

        if let Some(kz) = &synonym.kz {
            let kz_id = upsert_node(&tx, NodeKind::Translation, kz, "kz")?;
            link(&tx, syn_id, kz_id, RelationKind::LeKaz)?;
        }

        if let Some(en) = &synonym.en {
            let en_id = upsert_node(&tx, NodeKind::Translation, en, "en")?;
            link(&tx, syn_id, en_id, RelationKind::LeEng)?;
        }

        link(&tx, term_id, syn_id, synonym.class.relation_kind())?;

        tx.commit()?;
        Ok(())
    }

    // ========== Delete Operations ==========

    /// Cascading, kind-specific delete: collect the named node's subtree
    /// (Subclasses under a Class, Terms under those, Synonyms of the Terms,
    /// and Translations of everything collected), then detach-delete the
    /// whole set in one transaction. Symmetric term-term edges never extend
    /// the subtree. Returns the number of nodes removed.
    pub fn delete_cascade(&mut self, kind: NodeKind, name: &str) -> Result<usize> {
        let tx = self.conn.transaction()?;

        // Translations live under kz/en, so fall back to a lang-free lookup
        let root = match node_id(&tx, kind, name, BASE_LANG)? {
            Some(id) => id,
            None => tx
                .query_row(
                    "SELECT id FROM nodes WHERE kind = ?1 AND name = ?2",
                    params![kind.as_label(), name],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| Error::NodeNotFound(name.to_string()))?,
        };

        let mut ids = vec![root];

        // MT→Subclass to a fixpoint: parents resolve label-free on write,
        // so Subclass→Subclass nesting is a legal shape. The child-kind
        // filter keeps symmetric term-term MT edges out of the walk, and
        // the seen-check terminates it even on a cycle.
        let mut subclasses: Vec<i64> = Vec::new();
        if matches!(kind, NodeKind::Class | NodeKind::Subclass) {
            let mut frontier = vec![root];
            while !frontier.is_empty() {
                let found =
                    child_ids(&tx, &frontier, RelationKind::Mt, NodeKind::Subclass)?;
                frontier = found
                    .into_iter()
                    .filter(|id| *id != root && !subclasses.contains(id))
                    .collect();
                subclasses.extend(&frontier);
            }
            ids.extend(&subclasses);
        }

        // Terms hang off the root as well as off any collected Subclass
        let terms = match kind {
            NodeKind::Class | NodeKind::Subclass => {
                let mut parents = vec![root];
                parents.extend(&subclasses);
                child_ids(&tx, &parents, RelationKind::HasTermin, NodeKind::Term)?
            }
            NodeKind::Term => vec![root],
            _ => Vec::new(),
        };
        if kind != NodeKind::Term {
            ids.extend(&terms);
        }

        let mut synonyms = match kind {
            NodeKind::Synonym => vec![root],
            _ => Vec::new(),
        };
        synonyms.extend(child_ids(&tx, &terms, RelationKind::Uf1, NodeKind::Synonym)?);
        synonyms.extend(child_ids(&tx, &terms, RelationKind::Uf2, NodeKind::Synonym)?);
        if kind != NodeKind::Synonym {
            ids.extend(&synonyms);
        }

        // Translations of every collected primary node and synonym
        for edge in [RelationKind::LeKaz, RelationKind::LeEng] {
            ids.extend(child_ids(&tx, &ids.clone(), edge, NodeKind::Translation)?);
        }

        ids.sort_unstable();
        ids.dedup();

        // numbered placeholders, so the same ids bind both IN lists
        let placeholders = placeholders(ids.len());
        tx.execute(
            &format!(
                "DELETE FROM edges WHERE from_id IN ({placeholders}) OR to_id IN ({placeholders})"
            ),
            rusqlite::params_from_iter(ids.iter()),
        )?;
        let removed = tx.execute(
            &format!("DELETE FROM nodes WHERE id IN ({placeholders})"),
            rusqlite::params_from_iter(ids.iter()),
        )?;

        tx.commit()?;
        Ok(removed)
    }

    /// Delete all nodes and edges unconditionally
    pub fn wipe(&self) -> Result<()> {
        self.conn.execute("DELETE FROM edges", [])?;
        self.conn.execute("DELETE FROM nodes", [])?;
        Ok(())
    }

    // ========== Dump & Stats ==========

    /// Full dump of the graph: every node with its display group and every
    /// edge. Nodes without relationships appear as isolated entries.
    pub fn graph_data(&self) -> Result<GraphDump> {
        let mut stmt = self.conn.prepare("SELECT id, kind, name FROM nodes")?;
        let mut nodes = Vec::new();
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let kind: String = row.get(1)?;
            let name: String = row.get(2)?;
            Ok((id, kind, name))
        })?;
        for row in rows {
            let (id, kind, name) = row?;
            nodes.push(GraphNode {
                id,
                label: name,
                group: parse_kind(&kind)?.group(),
            });
        }

        let mut stmt = self
            .conn
            .prepare("SELECT from_id, to_id, kind FROM edges")?;
        let mut edges = Vec::new();
        let rows = stmt.query_map([], |row| {
            let from: i64 = row.get(0)?;
            let to: i64 = row.get(1)?;
            let kind: String = row.get(2)?;
            Ok((from, to, kind))
        })?;
        for row in rows {
            let (from, to, kind) = row?;
            edges.push(GraphEdge {
                from,
                to,
                label: parse_relation(&kind)?.as_str(),
            });
        }

        Ok(GraphDump { nodes, edges })
    }

    /// Count a node kind
    fn count_kind(&self, kind: NodeKind) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM nodes WHERE kind = ?1",
            [kind.as_label()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Count all edges
    pub fn count_edges(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            classes: self.count_kind(NodeKind::Class)?,
            subclasses: self.count_kind(NodeKind::Subclass)?,
            terms: self.count_kind(NodeKind::Term)?,
            translations: self.count_kind(NodeKind::Translation)?,
            synonyms: self.count_kind(NodeKind::Synonym)?,
            edges: self.count_edges()?,
        })
    }
}

// ========== Connection-level helpers (shared with transactions) ==========

fn upsert_node(conn: &Connection, kind: NodeKind, name: &str, lang: &str) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO nodes (kind, name, lang) VALUES (?1, ?2, ?3)",
        params![kind.as_label(), name, lang],
    )?;
    let id = conn.query_row(
        "SELECT id FROM nodes WHERE kind = ?1 AND name = ?2 AND lang = ?3",
        params![kind.as_label(), name, lang],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn find_by_name(conn: &Connection, name: &str, lang: &str) -> Result<Option<Node>> {
    conn.query_row(
        "SELECT id, kind, name, lang FROM nodes WHERE name = ?1 AND lang = ?2",
        params![name, lang],
        row_to_node,
    )
    .optional()
    .map_err(Into::into)
}

fn node_id(conn: &Connection, kind: NodeKind, name: &str, lang: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM nodes WHERE kind = ?1 AND name = ?2 AND lang = ?3",
        params![kind.as_label(), name, lang],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

fn link(conn: &Connection, from: i64, to: i64, kind: RelationKind) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO edges (from_id, to_id, kind) VALUES (?1, ?2, ?3)",
        params![from, to, kind.as_str()],
    )?;
    Ok(())
}

/// Ids of `child_kind` nodes one edge away from any of `parents`
fn child_ids(
    conn: &Connection,
    parents: &[i64],
    edge: RelationKind,
    child_kind: NodeKind,
) -> Result<Vec<i64>> {
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT DISTINCT c.id FROM edges e
         JOIN nodes c ON c.id = e.to_id
         WHERE e.from_id IN ({}) AND e.kind = ?1 AND c.kind = ?2",
        placeholders_from(parents.len(), 3),
    );
    let mut stmt = conn.prepare(&sql)?;

    let edge_name = edge.as_str();
    let child_label = child_kind.as_label();
    let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&edge_name, &child_label];
    for id in parents {
        bound.push(id);
    }

    let ids = stmt
        .query_map(&bound[..], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();

    Ok(ids)
}

/// `?1, ?2, ...` for value placeholders only; identifiers are never built
/// from request input
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders_from(count: usize, start: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_node(row: &rusqlite::Row) -> rusqlite::Result<Node> {
    let kind_str: String = row.get(1)?;
    let kind: NodeKind = kind_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Node {
        id: row.get(0)?,
        kind,
        name: row.get(2)?,
        lang: row.get(3)?,
    })
}

fn parse_kind(s: &str) -> Result<NodeKind> {
    s.parse()
}

fn parse_relation(s: &str) -> Result<RelationKind> {
    s.parse()
}

/// A node in the full-graph dump
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: i64,
    /// Display name
    pub label: String,
    /// Display category derived from the node kind
    pub group: &'static str,
}

/// An edge in the full-graph dump
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub from: i64,
    pub to: i64,
    pub label: &'static str,
}

/// Full node/edge dump of the graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphDump {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub classes: usize,
    pub subclasses: usize,
    pub terms: usize,
    pub translations: usize,
    pub synonyms: usize,
    pub edges: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Classes: {}", self.classes)?;
        writeln!(f, "  Subclasses: {}", self.subclasses)?;
        writeln!(f, "  Terms: {}", self.terms)?;
        writeln!(f, "  Translations: {}", self.translations)?;
        writeln!(f, "  Synonyms: {}", self.synonyms)?;
        writeln!(f, "  Edges: {}", self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_node(kind: NodeKind, ru: &str) -> NewNode {
        NewNode {
            kind,
            ru: ru.to_string(),
            kz: None,
            en: None,
            parent: None,
        }
    }

    fn seed_hierarchy(store: &mut GraphStore) {
        store
            .create_node(&new_node(NodeKind::Class, "Информатика"))
            .unwrap();
        store
            .create_node(&NewNode {
                parent: Some("Информатика".to_string()),
                ..new_node(NodeKind::Subclass, "Алгоритмы")
            })
            .unwrap();
        store
            .create_node(&NewNode {
                parent: Some("Алгоритмы".to_string()),
                ..new_node(NodeKind::Term, "Сортировка")
            })
            .unwrap();
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = GraphStore::open_in_memory().unwrap();

        let a = store.upsert_node(NodeKind::Class, "Информатика", "ru").unwrap();
        let b = store.upsert_node(NodeKind::Class, "Информатика", "ru").unwrap();
        assert_eq!(a, b);

        let names = store.list_names(NodeKind::Class).unwrap();
        assert_eq!(names, vec!["Информатика"]);
    }

    #[test]
    fn test_link_is_idempotent() {
        let store = GraphStore::open_in_memory().unwrap();
        let a = store.upsert_node(NodeKind::Term, "Сортировка", "ru").unwrap();
        let b = store.upsert_node(NodeKind::Term, "Поиск", "ru").unwrap();

        store.link(a, b, RelationKind::Nt).unwrap();
        store.link(a, b, RelationKind::Nt).unwrap();

        assert_eq!(store.count_edges().unwrap(), 1);
        assert_eq!(
            store.edges_from(a).unwrap(),
            vec![Edge::new(a, b, RelationKind::Nt)]
        );
    }

    #[test]
    fn test_find_by_name_ignores_label() {
        let store = GraphStore::open_in_memory().unwrap();
        store.upsert_node(NodeKind::Subclass, "Алгоритмы", "ru").unwrap();

        let node = store.find_by_name("Алгоритмы", "ru").unwrap().unwrap();
        assert_eq!(node.kind, NodeKind::Subclass);
        assert_eq!(node.lang, "ru");

        assert!(store.find_by_name("Алгоритмы", "en").unwrap().is_none());
    }

    #[test]
    fn test_create_node_with_translations() {
        let mut store = GraphStore::open_in_memory().unwrap();

        store
            .create_node(&NewNode {
                kz: Some("Информатика".to_string()),
                en: Some("Informatics".to_string()),
                ..new_node(NodeKind::Class, "Информатика")
            })
            .unwrap();

        let classes = store.list_names(NodeKind::Class).unwrap();
        assert_eq!(classes, vec!["Информатика"]);

        let id = store
            .node_id(NodeKind::Class, "Информатика", "ru")
            .unwrap()
            .unwrap();
        let edges = store.edges_from(id).unwrap();
        let kinds: Vec<RelationKind> = edges.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&RelationKind::LeKaz));
        assert!(kinds.contains(&RelationKind::LeEng));

        // creating the same node again adds nothing
        store
            .create_node(&new_node(NodeKind::Class, "Информатика"))
            .unwrap();
        assert_eq!(store.list_names(NodeKind::Class).unwrap().len(), 1);
    }

    #[test]
    fn test_parent_linkage_by_kind() {
        let mut store = GraphStore::open_in_memory().unwrap();
        seed_hierarchy(&mut store);

        let subs = store
            .children(
                NodeKind::Class,
                "Информатика",
                RelationKind::Mt,
                NodeKind::Subclass,
            )
            .unwrap();
        assert_eq!(subs, vec!["Алгоритмы"]);

        let terms = store
            .children(
                NodeKind::Subclass,
                "Алгоритмы",
                RelationKind::HasTermin,
                NodeKind::Term,
            )
            .unwrap();
        assert_eq!(terms, vec!["Сортировка"]);
    }

    #[test]
    fn test_missing_parent_rolls_back() {
        let mut store = GraphStore::open_in_memory().unwrap();

        let result = store.create_node(&NewNode {
            kz: Some("Аударма".to_string()),
            parent: Some("Нет такого".to_string()),
            ..new_node(NodeKind::Subclass, "Сироты")
        });
        assert!(matches!(result, Err(Error::NodeNotFound(_))));

        // whole write rolled back, including the kz translation
        assert!(store.list_names(NodeKind::Subclass).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Translation).unwrap().is_empty());
    }

    #[test]
    fn test_children_of_nonexistent_parent_is_empty() {
        let store = GraphStore::open_in_memory().unwrap();

        let subs = store
            .children(
                NodeKind::Class,
                "Неизвестный",
                RelationKind::Mt,
                NodeKind::Subclass,
            )
            .unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_symmetric_relation_pair() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Term, "Сортировка")).unwrap();
        store.create_node(&new_node(NodeKind::Term, "Поиск")).unwrap();

        store
            .create_term_relation("Сортировка", "Поиск", TermRelation::Rt)
            .unwrap();

        let a = store.node_id(NodeKind::Term, "Сортировка", "ru").unwrap().unwrap();
        let b = store.node_id(NodeKind::Term, "Поиск", "ru").unwrap().unwrap();

        let forward = Edge::new(a, b, RelationKind::Rt);
        assert_eq!(store.edges_from(a).unwrap(), vec![forward.clone()]);
        assert_eq!(store.edges_from(b).unwrap(), vec![forward.reversed()]);

        // repeating the write does not duplicate the pair
        store
            .create_term_relation("Сортировка", "Поиск", TermRelation::Rt)
            .unwrap();
        assert_eq!(store.count_edges().unwrap(), 2);
    }

    #[test]
    fn test_relation_requires_both_terms() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Term, "Сортировка")).unwrap();

        let result =
            store.create_term_relation("Сортировка", "Нет такого", TermRelation::Nt);
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
        assert_eq!(store.count_edges().unwrap(), 0);
    }

    #[test]
    fn test_add_synonym() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Term, "Сортировка")).unwrap();

        store
            .add_synonym(&NewSynonym {
                term: "Сортировка".to_string(),
                synonym: "Упорядочивание".to_string(),
                kz: Some("Реттеу".to_string()),
                en: None,
                class: SynonymClass::Uf2,
            })
            .unwrap();

        let term_id = store.node_id(NodeKind::Term, "Сортировка", "ru").unwrap().unwrap();
        let syn_id = store
            .node_id(NodeKind::Synonym, "Упорядочивание", "ru")
            .unwrap()
            .unwrap();
        assert_eq!(
            store.edges_from(term_id).unwrap(),
            vec![Edge::new(term_id, syn_id, RelationKind::Uf2)]
        );

        let syn_edges = store.edges_from(syn_id).unwrap();
        assert_eq!(syn_edges.len(), 1);
        assert_eq!(syn_edges[0].kind, RelationKind::LeKaz);
    }

    #[test]
    fn test_synonym_requires_term() {
        let mut store = GraphStore::open_in_memory().unwrap();

        let result = store.add_synonym(&NewSynonym {
            term: "Нет такого".to_string(),
            synonym: "Синоним".to_string(),
            kz: None,
            en: None,
            class: SynonymClass::Uf1,
        });
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
        assert!(store.list_names(NodeKind::Synonym).unwrap().is_empty());
    }

    #[test]
    fn test_delete_class_cascades_subtree_only() {
        let mut store = GraphStore::open_in_memory().unwrap();
        seed_hierarchy(&mut store);

        // subtree extras: translation on the term, a synonym with its own kz
        store
            .create_node(&NewNode {
                en: Some("Sorting".to_string()),
                parent: Some("Алгоритмы".to_string()),
                ..new_node(NodeKind::Term, "Сортировка")
            })
            .unwrap();
        store
            .add_synonym(&NewSynonym {
                term: "Сортировка".to_string(),
                synonym: "Упорядочивание".to_string(),
                kz: Some("Реттеу".to_string()),
                en: None,
                class: SynonymClass::Uf1,
            })
            .unwrap();

        // an unrelated class that must survive
        store.create_node(&new_node(NodeKind::Class, "Математика")).unwrap();

        let removed = store.delete_cascade(NodeKind::Class, "Информатика").unwrap();
        // class + subclass + term + translation + synonym + synonym's translation
        assert_eq!(removed, 6);

        assert_eq!(store.list_names(NodeKind::Class).unwrap(), vec!["Математика"]);
        assert!(store.list_names(NodeKind::Subclass).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Term).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Translation).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Synonym).unwrap().is_empty());
        assert_eq!(store.count_edges().unwrap(), 0);
    }

    #[test]
    fn test_delete_class_cascades_nested_subclasses() {
        let mut store = GraphStore::open_in_memory().unwrap();
        seed_hierarchy(&mut store);

        // label-free parent resolution permits Subclass→Subclass nesting
        store
            .create_node(&NewNode {
                parent: Some("Алгоритмы".to_string()),
                ..new_node(NodeKind::Subclass, "Сортировки")
            })
            .unwrap();
        store
            .create_node(&NewNode {
                parent: Some("Сортировки".to_string()),
                ..new_node(NodeKind::Term, "Быстрая сортировка")
            })
            .unwrap();

        store.delete_cascade(NodeKind::Class, "Информатика").unwrap();

        assert!(store.list_names(NodeKind::Class).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Subclass).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Term).unwrap().is_empty());
        assert_eq!(store.count_edges().unwrap(), 0);
    }

    #[test]
    fn test_delete_class_cascades_direct_terms() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Class, "Информатика")).unwrap();

        // a Term created with a Class parent links Class→HAS_TERMIN→Term
        store
            .create_node(&NewNode {
                parent: Some("Информатика".to_string()),
                ..new_node(NodeKind::Term, "Алгоритм")
            })
            .unwrap();

        store.delete_cascade(NodeKind::Class, "Информатика").unwrap();

        assert!(store.list_names(NodeKind::Class).unwrap().is_empty());
        assert!(store.list_names(NodeKind::Term).unwrap().is_empty());
        assert_eq!(store.count_edges().unwrap(), 0);
    }

    #[test]
    fn test_delete_term_keeps_related_terms() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Term, "Сортировка")).unwrap();
        store.create_node(&new_node(NodeKind::Term, "Поиск")).unwrap();
        store
            .create_term_relation("Сортировка", "Поиск", TermRelation::Mt)
            .unwrap();

        store.delete_cascade(NodeKind::Term, "Сортировка").unwrap();

        // symmetric MT edges must not pull the peer term into the cascade
        assert_eq!(store.list_names(NodeKind::Term).unwrap(), vec!["Поиск"]);
        assert_eq!(store.count_edges().unwrap(), 0);
    }

    #[test]
    fn test_delete_missing_node() {
        let mut store = GraphStore::open_in_memory().unwrap();
        let result = store.delete_cascade(NodeKind::Class, "Нет такого");
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_graph_data_includes_isolated_nodes() {
        let mut store = GraphStore::open_in_memory().unwrap();
        store.create_node(&new_node(NodeKind::Class, "Информатика")).unwrap();
        store
            .create_node(&NewNode {
                kz: Some("Алгоритмдер".to_string()),
                parent: Some("Информатика".to_string()),
                ..new_node(NodeKind::Subclass, "Алгоритмы")
            })
            .unwrap();

        let dump = store.graph_data().unwrap();
        assert_eq!(dump.nodes.len(), 3);
        assert_eq!(dump.edges.len(), 2);

        let groups: Vec<&str> = dump.nodes.iter().map(|n| n.group).collect();
        assert!(groups.contains(&"class"));
        assert!(groups.contains(&"subclass"));
        assert!(groups.contains(&"translate"));

        let labels: Vec<&str> = dump.edges.iter().map(|e| e.label).collect();
        assert!(labels.contains(&"MT"));
        assert!(labels.contains(&"LE_KAZ"));

        // a wiped store dumps empty, not an error
        store.wipe().unwrap();
        let dump = store.graph_data().unwrap();
        assert!(dump.nodes.is_empty());
        assert!(dump.edges.is_empty());
    }

    #[test]
    fn test_stats() {
        let mut store = GraphStore::open_in_memory().unwrap();
        seed_hierarchy(&mut store);

        let stats = store.stats().unwrap();
        assert_eq!(stats.classes, 1);
        assert_eq!(stats.subclasses, 1);
        assert_eq!(stats.terms, 1);
        assert_eq!(stats.edges, 2);
    }
}
