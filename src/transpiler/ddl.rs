//! CREATE SCHEMA / CREATE TABLE / ALTER TABLE generation.
//!
//! Tables only grow: new document columns become `ADD COLUMN`s, nothing is
//! ever dropped, renamed or retyped.

use super::{ColumnDef, Statement};
use crate::ast::{Document, OplogEntry};
use crate::cache::SchemaCache;
use crate::error::OplogResult;

/// Generate CREATE SCHEMA.
pub fn build_create_schema(schema: &str) -> Statement {
    Statement::CreateSchema {
        schema: schema.to_string(),
    }
}

/// Generate CREATE TABLE with every document column, ascending.
///
/// Marks each column as declared for the entry's namespace.
pub fn build_create_table(entry: &OplogEntry, cache: &mut SchemaCache) -> OplogResult<Statement> {
    let table = entry.namespace()?;
    let document = entry.document()?;

    let columns = column_defs(&document, document.keys().map(String::as_str));
    for col in &columns {
        cache.mark_column(table, &col.name);
    }

    Ok(Statement::CreateTable {
        table: table.to_string(),
        columns,
    })
}

/// Generate ALTER TABLE ... ADD COLUMN for document columns not yet declared.
///
/// Marks each added column as declared.
pub fn build_alter_table(entry: &OplogEntry, cache: &mut SchemaCache) -> OplogResult<Statement> {
    let table = entry.namespace()?;
    let document = entry.document()?;

    let columns = column_defs(&document, cache.missing_columns(table, &document).into_iter());
    for col in &columns {
        cache.mark_column(table, &col.name);
    }

    Ok(Statement::AlterTable {
        table: table.to_string(),
        columns,
    })
}

fn column_defs<'a>(document: &Document, names: impl Iterator<Item = &'a str>) -> Vec<ColumnDef> {
    names
        .filter_map(|name| {
            document.get(name).map(|value| ColumnDef {
                name: name.to_string(),
                sql_type: value.sql_type(name),
            })
        })
        .collect()
}

pub(super) fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.sql_type))
        .collect();
    format!("CREATE TABLE {} ({});", table, defs.join(", "))
}

pub(super) fn alter_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let adds: Vec<String> = columns
        .iter()
        .map(|c| format!("ADD COLUMN {} {}", c.name, c.sql_type))
        .collect();
    format!("ALTER TABLE {} {};", table, adds.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ToSql;
    use serde_json::json;

    fn entry(v: serde_json::Value) -> OplogEntry {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_create_schema() {
        assert_eq!(build_create_schema("test").to_sql(), "CREATE SCHEMA test;");
    }

    #[test]
    fn test_create_table() {
        let e = entry(json!({
            "op": "i",
            "ns": "test.student",
            "o": {
                "_id": "635b79e231d82a8ab1de863b",
                "name": "Selena Miller",
                "roll_no": 51,
                "is_graduated": false,
                "date_of_birth": "2000-01-30"
            }
        }));
        let mut cache = SchemaCache::new();
        let sql = build_create_table(&e, &mut cache).unwrap().to_sql();
        assert_eq!(
            sql,
            "CREATE TABLE test.student (_id VARCHAR(255) PRIMARY KEY, date_of_birth VARCHAR(255), \
             is_graduated BOOLEAN, name VARCHAR(255), roll_no INTEGER);"
        );
        for col in ["_id", "date_of_birth", "is_graduated", "name", "roll_no"] {
            assert!(cache.has_column("test.student", col));
        }
    }

    #[test]
    fn test_create_table_float_column() {
        let e = entry(json!({"op": "i", "ns": "db.t", "o": {"score": 9.5}}));
        let sql = build_create_table(&e, &mut SchemaCache::new()).unwrap().to_sql();
        assert_eq!(sql, "CREATE TABLE db.t (score FLOAT);");
    }

    #[test]
    fn test_alter_table_adds_only_new_columns() {
        let e = entry(json!({
            "op": "i",
            "ns": "test.student",
            "o": {"_id": 2, "name": "x", "phone": "555", "is_active": true}
        }));
        let mut cache = SchemaCache::new();
        cache.mark_column("test.student", "_id");
        cache.mark_column("test.student", "name");

        let sql = build_alter_table(&e, &mut cache).unwrap().to_sql();
        assert_eq!(
            sql,
            "ALTER TABLE test.student ADD COLUMN is_active BOOLEAN, ADD COLUMN phone VARCHAR(255);"
        );
        assert!(cache.has_column("test.student", "phone"));
        assert!(cache.has_column("test.student", "is_active"));
    }

    #[test]
    fn test_missing_namespace() {
        let e = entry(json!({"op": "i", "o": {"a": 1}}));
        assert!(build_create_table(&e, &mut SchemaCache::new()).is_err());
    }
}
