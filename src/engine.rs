//! Translation engine.
//!
//! [`translate_entry`] dispatches one entry to the generators;
//! [`translate_batch`] runs a whole batch against one [`SchemaCache`].

use serde::Serialize;

use crate::ast::{OplogEntry, Operation};
use crate::cache::SchemaCache;
use crate::error::{OplogError, OplogResult};
use crate::parser;
use crate::transpiler::{self, Statement, ToSql};

/// Outcome of one batch.
///
/// `statements` holds everything produced before the first failure, so a
/// caller must check `error` even when statements are present.
#[derive(Debug, Default, Serialize)]
pub struct Translation {
    pub statements: Vec<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<OplogError>,
    /// Entries fully translated. On failure, the index of the failing entry.
    pub processed: usize,
}

impl Translation {
    fn failed(error: OplogError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drop partial output on failure.
    pub fn into_result(self) -> OplogResult<Vec<String>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.statements),
        }
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<OplogError>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}

/// Statements for one entry, in emission order.
///
/// Inserts may be preceded by CREATE SCHEMA, then CREATE TABLE or ALTER
/// TABLE, depending on what `cache` already knows. Unknown operations
/// yield nothing.
pub fn translate_entry(entry: &OplogEntry, cache: &mut SchemaCache) -> OplogResult<Vec<Statement>> {
    match &entry.op {
        Operation::Insert => translate_insert(entry, cache),
        Operation::Update => Ok(vec![transpiler::build_update(entry)?]),
        Operation::Delete => Ok(vec![transpiler::build_delete(entry)?]),
        Operation::Unknown(raw) => {
            tracing::debug!("Skipping oplog entry with operation '{}'", raw);
            Ok(Vec::new())
        }
    }
}

fn translate_insert(entry: &OplogEntry, cache: &mut SchemaCache) -> OplogResult<Vec<Statement>> {
    let table = entry.namespace()?;
    let document = entry.document()?;
    let mut stmts = Vec::new();

    let schema = entry.schema();
    if !cache.has_schema(schema) {
        stmts.push(transpiler::build_create_schema(schema));
        cache.mark_schema(schema);
    }

    if !cache.has_table(table) {
        stmts.push(transpiler::build_create_table(entry, cache)?);
        cache.mark_table(table);
    } else if !cache.missing_columns(table, &document).is_empty() {
        stmts.push(transpiler::build_alter_table(entry, cache)?);
    }

    stmts.push(transpiler::build_insert(entry)?);
    Ok(stmts)
}

/// Translate entries in order against `cache`.
///
/// Stops at the first failing entry; statements from earlier entries are
/// kept in the result.
pub fn translate_batch(entries: &[OplogEntry], mut cache: SchemaCache) -> Translation {
    let mut out = Translation::default();

    for (i, entry) in entries.iter().enumerate() {
        match translate_entry(entry, &mut cache) {
            Ok(stmts) => {
                for stmt in stmts {
                    let sql = stmt.to_sql();
                    tracing::debug!("{}", sql);
                    out.statements.push(sql);
                }
                out.processed += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "Oplog entry {} ({} on '{}') failed: {}",
                    i,
                    entry.op.name(),
                    entry.ns,
                    e
                );
                out.error = Some(e);
                break;
            }
        }
    }

    out
}

/// Parse `input` (an entry or an array of entries) and translate it with a
/// fresh, empty cache.
///
/// # Example
///
/// ```
/// let out = oplog2sql::generate_sql(r#"{"op": "d", "ns": "db.t", "o": {"_id": 2}}"#);
/// assert_eq!(out.into_result().unwrap(), vec!["DELETE FROM db.t WHERE _id = 2;"]);
/// ```
pub fn generate_sql(input: &str) -> Translation {
    generate_sql_with_cache(input, SchemaCache::new())
}

/// Like [`generate_sql`], starting from a caller-provided (e.g. pre-seeded) cache.
pub fn generate_sql_with_cache(input: &str, cache: SchemaCache) -> Translation {
    match parser::parse(input) {
        Ok(entries) => translate_batch(&entries, cache),
        Err(e) => Translation::failed(e),
    }
}
