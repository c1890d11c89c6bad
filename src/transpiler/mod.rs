//! SQL generation for oplog entries.
//!
//! Builders in [`ddl`] and [`dml`] turn an entry into a [`Statement`];
//! [`ToSql`] renders it. Every rendered statement ends with `;`.

pub mod ddl;
pub mod dml;

pub use ddl::{build_alter_table, build_create_schema, build_create_table};
pub use dml::{build_delete, build_insert, build_update};

use crate::ast::{Diff, Document};

/// Trait for converting statements to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

/// A column declaration in CREATE/ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
}

/// One generated SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateSchema {
        schema: String,
    },
    CreateTable {
        table: String,
        columns: Vec<ColumnDef>,
    },
    AlterTable {
        table: String,
        columns: Vec<ColumnDef>,
    },
    Insert {
        table: String,
        row: Document,
    },
    Update {
        table: String,
        diff: Diff,
        filter: Document,
    },
    Delete {
        table: String,
        filter: Document,
    },
}

impl Statement {
    /// Short label, e.g. for `explain` output.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::CreateSchema { .. } => "CREATE SCHEMA",
            Statement::CreateTable { .. } => "CREATE TABLE",
            Statement::AlterTable { .. } => "ALTER TABLE",
            Statement::Insert { .. } => "INSERT",
            Statement::Update { .. } => "UPDATE",
            Statement::Delete { .. } => "DELETE",
        }
    }
}

impl ToSql for Statement {
    fn to_sql(&self) -> String {
        match self {
            Statement::CreateSchema { schema } => format!("CREATE SCHEMA {};", schema),
            Statement::CreateTable { table, columns } => ddl::create_table_sql(table, columns),
            Statement::AlterTable { table, columns } => ddl::alter_table_sql(table, columns),
            Statement::Insert { table, row } => dml::insert_sql(table, row),
            Statement::Update {
                table,
                diff,
                filter,
            } => dml::update_sql(table, diff, filter),
            Statement::Delete { table, filter } => dml::delete_sql(table, filter),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
