//! SQLite implementation of [`FlowStore`].
//!
//! [`SqliteStore`] keeps one row per (collection, user) in `flow_documents`.
//! Node and edge arrays are stored as JSON TEXT via serde_json. `updated_at`
//! is produced by SQLite inside the write statement and clamped so it never
//! moves backwards for a given document.
//!
//! Node-level edits open an IMMEDIATE transaction, read the row, apply the
//! edit in Rust, and write it back before committing, so the whole
//! read-modify-write holds the database write lock.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use flowsync_core::{FlowContent, FlowDocument, FlowEdge, FlowNode, Removal, Theme, UserId};

use crate::error::StorageError;
use crate::schema::NOW_SQL;
use crate::traits::FlowStore;
use crate::types::{UserSummary, DEFAULT_COLLECTION};

/// SQLite-backed implementation of [`FlowStore`].
pub struct SqliteStore {
    conn: Connection,
    collection: String,
}

/// Raw column values of one `flow_documents` row.
struct DocumentRow {
    nodes_json: String,
    edges_json: String,
    theme: String,
    node_count: i64,
    edge_count: i64,
    updated_at: String,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore {
            conn,
            collection: DEFAULT_COLLECTION.to_string(),
        })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore {
            conn,
            collection: DEFAULT_COLLECTION.to_string(),
        })
    }

    /// Scopes this store to a named collection. Documents in other
    /// collections of the same database are invisible to it.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn read_row(
        conn: &Connection,
        collection: &str,
        user_id: &UserId,
    ) -> Result<Option<DocumentRow>, StorageError> {
        let row = conn
            .query_row(
                "SELECT nodes_json, edges_json, theme, node_count, edge_count, updated_at
                 FROM flow_documents WHERE collection = ?1 AND user_id = ?2",
                params![collection, user_id.as_str()],
                |row| {
                    Ok(DocumentRow {
                        nodes_json: row.get(0)?,
                        edges_json: row.get(1)?,
                        theme: row.get(2)?,
                        node_count: row.get(3)?,
                        edge_count: row.get(4)?,
                        updated_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn decode(user_id: &UserId, row: DocumentRow) -> Result<FlowDocument, StorageError> {
        let nodes: Vec<FlowNode> = serde_json::from_str(&row.nodes_json)?;
        let edges: Vec<FlowEdge> = serde_json::from_str(&row.edges_json)?;
        Ok(FlowDocument {
            user_id: user_id.clone(),
            nodes,
            edges,
            theme: Theme(row.theme),
            node_count: count_from_sql(user_id, row.node_count)?,
            edge_count: count_from_sql(user_id, row.edge_count)?,
            updated_at: parse_timestamp(user_id, &row.updated_at)?,
        })
    }

    /// Writes the arrays and counts of `doc` back to its row and bumps
    /// `updated_at`. Returns the timestamp SQLite assigned.
    fn write_arrays(
        conn: &Connection,
        collection: &str,
        doc: &FlowDocument,
    ) -> Result<DateTime<Utc>, StorageError> {
        let nodes_json = serde_json::to_string(&doc.nodes)?;
        let edges_json = serde_json::to_string(&doc.edges)?;
        let sql = format!(
            "UPDATE flow_documents
             SET nodes_json = ?3, edges_json = ?4, node_count = ?5, edge_count = ?6,
                 updated_at = MAX(updated_at, {NOW_SQL})
             WHERE collection = ?1 AND user_id = ?2
             RETURNING updated_at"
        );
        let updated_at: String = conn.query_row(
            &sql,
            params![
                collection,
                doc.user_id.as_str(),
                nodes_json,
                edges_json,
                doc.node_count as i64,
                doc.edge_count as i64,
            ],
            |row| row.get(0),
        )?;
        parse_timestamp(&doc.user_id, &updated_at)
    }

    /// Runs `edit` against the stored document inside one IMMEDIATE
    /// transaction and persists the result.
    fn edit_document<T>(
        &mut self,
        user_id: &UserId,
        edit: impl FnOnce(&mut FlowDocument) -> T,
    ) -> Result<(FlowDocument, T), StorageError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let row = Self::read_row(&tx, &self.collection, user_id)?
            .ok_or_else(|| StorageError::DocumentNotFound(user_id.to_string()))?;
        let mut doc = Self::decode(user_id, row)?;
        let outcome = edit(&mut doc);
        doc.updated_at = Self::write_arrays(&tx, &self.collection, &doc)?;
        tx.commit()?;
        Ok((doc, outcome))
    }
}

impl FlowStore for SqliteStore {
    fn put_document(
        &mut self,
        user_id: &UserId,
        content: FlowContent,
    ) -> Result<FlowDocument, StorageError> {
        let nodes_json = serde_json::to_string(&content.nodes)?;
        let edges_json = serde_json::to_string(&content.edges)?;
        let sql = format!(
            "INSERT INTO flow_documents (
                 collection, user_id, nodes_json, edges_json, theme, node_count, edge_count, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, {NOW_SQL})
             ON CONFLICT(collection, user_id) DO UPDATE SET
                 nodes_json = excluded.nodes_json,
                 edges_json = excluded.edges_json,
                 theme = excluded.theme,
                 node_count = excluded.node_count,
                 edge_count = excluded.edge_count,
                 updated_at = MAX(flow_documents.updated_at, excluded.updated_at)
             RETURNING updated_at"
        );

        let tx = self.conn.transaction()?;
        let updated_at: String = tx.query_row(
            &sql,
            params![
                self.collection,
                user_id.as_str(),
                nodes_json,
                edges_json,
                content.theme.as_str(),
                content.nodes.len() as i64,
                content.edges.len() as i64,
            ],
            |row| row.get(0),
        )?;
        tx.commit()?;

        let updated_at = parse_timestamp(user_id, &updated_at)?;
        Ok(FlowDocument::from_content(user_id.clone(), content, updated_at))
    }

    fn get_document(&self, user_id: &UserId) -> Result<Option<FlowDocument>, StorageError> {
        match Self::read_row(&self.conn, &self.collection, user_id)? {
            Some(row) => Ok(Some(Self::decode(user_id, row)?)),
            None => Ok(None),
        }
    }

    fn delete_document(&mut self, user_id: &UserId) -> Result<bool, StorageError> {
        let deleted = self.conn.execute(
            "DELETE FROM flow_documents WHERE collection = ?1 AND user_id = ?2",
            params![self.collection, user_id.as_str()],
        )?;
        Ok(deleted > 0)
    }

    fn append_node(
        &mut self,
        user_id: &UserId,
        node: FlowNode,
    ) -> Result<(FlowDocument, bool), StorageError> {
        self.edit_document(user_id, |doc| doc.append_node(node))
    }

    fn remove_node(
        &mut self,
        user_id: &UserId,
        node_id: &str,
    ) -> Result<(FlowDocument, Removal), StorageError> {
        self.edit_document(user_id, |doc| doc.remove_node(node_id))
    }

    fn list_documents(&self) -> Result<Vec<UserSummary>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT user_id, theme, node_count, edge_count, updated_at
             FROM flow_documents WHERE collection = ?1 ORDER BY user_id",
        )?;
        let rows = stmt.query_map(params![self.collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (user_id, theme, node_count, edge_count, updated_at) = row?;
            let user_id = UserId(user_id);
            result.push(UserSummary {
                node_count: count_from_sql(&user_id, node_count)?,
                edge_count: count_from_sql(&user_id, edge_count)?,
                theme: Theme(theme),
                updated_at: parse_timestamp(&user_id, &updated_at)?,
                user_id,
            });
        }
        Ok(result)
    }
}

fn parse_timestamp(user_id: &UserId, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt {
            user_id: user_id.to_string(),
            reason: format!("bad updated_at '{}': {}", raw, e),
        })
}

fn count_from_sql(user_id: &UserId, raw: i64) -> Result<usize, StorageError> {
    usize::try_from(raw).map_err(|_| StorageError::Corrupt {
        user_id: user_id.to_string(),
        reason: format!("negative count {}", raw),
    })
}
