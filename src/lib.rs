//! # oplog2sql
//!
//! Translates MongoDB-style oplog entries into SQL.
//!
//! Tables are inferred from the documents themselves: the first insert into
//! a namespace creates its schema and table, later inserts with unseen
//! fields add columns. Updates and deletes map to plain UPDATE/DELETE.
//!
//! ## Quick Example
//!
//! ```
//! let out = oplog2sql::generate_sql(
//!     r#"{"op": "i", "ns": "db.t", "o": {"b": 1, "a": "x"}}"#,
//! );
//! assert_eq!(
//!     out.into_result().unwrap(),
//!     vec![
//!         "CREATE SCHEMA db;",
//!         "CREATE TABLE db.t (a VARCHAR(255), b INTEGER);",
//!         "INSERT INTO db.t (a, b) VALUES ('x', 1);",
//!     ]
//! );
//! ```
//!
//! ## Type Mapping
//!
//! | JSON value        | Column type     | Literal        |
//! |-------------------|-----------------|----------------|
//! | integer           | `INTEGER`       | `42`           |
//! | float             | `FLOAT`         | `4.2`          |
//! | boolean           | `BOOLEAN`       | `true`         |
//! | anything else     | `VARCHAR(255)`  | `'text'`       |
//!
//! A column named `_id` is always the `PRIMARY KEY`.

pub mod ast;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod transpiler;

pub use engine::{generate_sql, generate_sql_with_cache, translate_batch, Translation};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::cache::SchemaCache;
    pub use crate::config::{Config, OutputFormat};
    pub use crate::engine::{
        generate_sql, generate_sql_with_cache, translate_batch, translate_entry, Translation,
    };
    pub use crate::error::*;
    pub use crate::parser::{parse, parse_lines};
    pub use crate::transpiler::{Statement, ToSql};
}
