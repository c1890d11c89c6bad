//! Schema state cache.
//!
//! Records which schemas, tables and columns have already been declared
//! during one batch. Marks only ever accumulate: there is no removal API.

use std::collections::{HashMap, HashSet};

use crate::ast::Document;
use crate::config::CacheConfig;
use crate::error::{OplogError, OplogResult};

/// Per-batch ledger of declared schemas, tables and columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCache {
    schemas: HashSet<String>,
    tables: HashSet<String>,
    /// namespace → declared column names
    columns: HashMap<String, HashSet<String>>,
}

impl SchemaCache {
    /// An empty cache: nothing is assumed to exist.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache pre-seeded with objects that already exist in the target.
    pub fn from_config(config: &CacheConfig) -> OplogResult<Self> {
        let mut cache = Self::new();
        for schema in &config.schemas {
            cache.seed_schema(schema);
        }
        for table in &config.tables {
            cache.seed_table(table);
        }
        for key in &config.columns {
            let (ns, column) = key
                .rsplit_once('.')
                .filter(|(ns, col)| ns.contains('.') && !col.is_empty())
                .ok_or_else(|| {
                    OplogError::Config(format!(
                        "column '{}' must look like <schema>.<table>.<column>",
                        key
                    ))
                })?;
            cache.seed_column(ns, column);
        }
        Ok(cache)
    }

    pub fn has_schema(&self, schema: &str) -> bool {
        self.schemas.contains(schema)
    }

    pub fn mark_schema(&mut self, schema: &str) {
        tracing::trace!("cache: schema {}", schema);
        self.schemas.insert(schema.to_string());
    }

    pub fn has_table(&self, ns: &str) -> bool {
        self.tables.contains(ns)
    }

    pub fn mark_table(&mut self, ns: &str) {
        tracing::trace!("cache: table {}", ns);
        self.tables.insert(ns.to_string());
    }

    pub fn has_column(&self, ns: &str, column: &str) -> bool {
        self.columns
            .get(ns)
            .is_some_and(|cols| cols.contains(column))
    }

    pub fn mark_column(&mut self, ns: &str, column: &str) {
        tracing::trace!("cache: column {}.{}", ns, column);
        self.columns
            .entry(ns.to_string())
            .or_default()
            .insert(column.to_string());
    }

    /// Declare an existing schema.
    pub fn seed_schema(&mut self, schema: &str) {
        self.mark_schema(schema);
    }

    /// Declare an existing table. Its schema is implied.
    pub fn seed_table(&mut self, ns: &str) {
        let schema = ns.split('.').next().unwrap_or_default();
        self.mark_schema(schema);
        self.mark_table(ns);
    }

    /// Declare an existing column. Its table and schema are implied.
    pub fn seed_column(&mut self, ns: &str, column: &str) {
        self.seed_table(ns);
        self.mark_column(ns, column);
    }

    /// Columns of `document` not yet declared for `ns`, ascending.
    pub fn missing_columns<'a>(&self, ns: &str, document: &'a Document) -> Vec<&'a str> {
        document
            .keys()
            .filter(|col| !self.has_column(ns, col))
            .map(String::as_str)
            .collect()
    }
}
