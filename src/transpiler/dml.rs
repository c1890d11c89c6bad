//! INSERT / UPDATE / DELETE generation.

use super::Statement;
use crate::ast::{Diff, Document, OplogEntry};
use crate::error::OplogResult;

/// Generate INSERT with columns ascending.
pub fn build_insert(entry: &OplogEntry) -> OplogResult<Statement> {
    Ok(Statement::Insert {
        table: entry.namespace()?.to_string(),
        row: entry.document()?,
    })
}

/// Generate UPDATE from `o.diff` (SET) and `o2` (WHERE).
pub fn build_update(entry: &OplogEntry) -> OplogResult<Statement> {
    let table = entry.namespace()?.to_string();
    let diff = entry.diff()?;
    let filter = entry.filter()?;
    Ok(Statement::Update {
        table,
        diff,
        filter,
    })
}

/// Generate DELETE using `o` as the WHERE source.
pub fn build_delete(entry: &OplogEntry) -> OplogResult<Statement> {
    Ok(Statement::Delete {
        table: entry.namespace()?.to_string(),
        filter: entry.filter()?,
    })
}

pub(super) fn insert_sql(table: &str, row: &Document) -> String {
    let cols: Vec<&str> = row.keys().map(String::as_str).collect();
    let values: Vec<String> = row.values().map(|v| v.literal()).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        cols.join(", "),
        values.join(", ")
    )
}

pub(super) fn update_sql(table: &str, diff: &Diff, filter: &Document) -> String {
    let mut assignments: Vec<String> = match diff {
        Diff::Set(doc) => doc
            .iter()
            .map(|(col, val)| format!("{} = {}", col, val))
            .collect(),
        Diff::Unset(cols) => cols.iter().map(|col| format!("{} = NULL", col)).collect(),
    };
    assignments.sort();

    format!(
        "UPDATE {} SET {} WHERE {};",
        table,
        assignments.join(", "),
        conditions_sql(filter)
    )
}

pub(super) fn delete_sql(table: &str, filter: &Document) -> String {
    format!("DELETE FROM {} WHERE {};", table, conditions_sql(filter))
}

/// `col = literal` pairs joined with AND, ascending by column.
fn conditions_sql(filter: &Document) -> String {
    filter
        .iter()
        .map(|(col, val)| format!("{} = {}", col, val))
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OplogError;
    use crate::transpiler::ToSql;
    use serde_json::json;

    fn entry(v: serde_json::Value) -> OplogEntry {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_insert() {
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
        assert_eq!(
            build_insert(&e).unwrap().to_sql(),
            "INSERT INTO test.student (_id, date_of_birth, is_graduated, name, roll_no) \
             VALUES ('635b79e231d82a8ab1de863b', '2000-01-30', false, 'Selena Miller', 51);"
        );
    }

    #[test]
    fn test_insert_sorts_columns() {
        let e = entry(json!({"op": "i", "ns": "db.t", "o": {"b": 1, "a": "x"}}));
        assert_eq!(
            build_insert(&e).unwrap().to_sql(),
            "INSERT INTO db.t (a, b) VALUES ('x', 1);"
        );
    }

    #[test]
    fn test_update_set() {
        let e = entry(json!({
            "op": "u",
            "ns": "db.t",
            "o": {"$v": 2, "diff": {"u": {"x": 5}}},
            "o2": {"_id": 1}
        }));
        assert_eq!(
            build_update(&e).unwrap().to_sql(),
            "UPDATE db.t SET x = 5 WHERE _id = 1;"
        );
    }

    #[test]
    fn test_update_set_many_sorted() {
        let e = entry(json!({
            "op": "u",
            "ns": "test.student",
            "o": {"diff": {"u": {"is_graduated": true, "age": 22}}},
            "o2": {"_id": "635b79e231d82a8ab1de863b"}
        }));
        assert_eq!(
            build_update(&e).unwrap().to_sql(),
            "UPDATE test.student SET age = 22, is_graduated = true \
             WHERE _id = '635b79e231d82a8ab1de863b';"
        );
    }

    #[test]
    fn test_update_unset() {
        let e = entry(json!({
            "op": "u",
            "ns": "test.student",
            "o": {"$v": 2, "diff": {"d": {"roll_no": false, "email": false}}},
            "o2": {"_id": "635b79e231d82a8ab1de863b"}
        }));
        assert_eq!(
            build_update(&e).unwrap().to_sql(),
            "UPDATE test.student SET email = NULL, roll_no = NULL \
             WHERE _id = '635b79e231d82a8ab1de863b';"
        );
    }

    #[test]
    fn test_update_multi_condition_filter() {
        let e = entry(json!({
            "op": "u",
            "ns": "db.t",
            "o": {"diff": {"u": {"x": 1}}},
            "o2": {"tenant": "acme", "_id": 7}
        }));
        assert_eq!(
            build_update(&e).unwrap().to_sql(),
            "UPDATE db.t SET x = 1 WHERE _id = 7 AND tenant = 'acme';"
        );
    }

    #[test]
    fn test_update_without_diff_kind() {
        let e = entry(json!({
            "op": "u",
            "ns": "db.t",
            "o": {"diff": {"i": {"x": 1}}},
            "o2": {"_id": 1}
        }));
        assert!(matches!(build_update(&e), Err(OplogError::InvalidUpdate(_))));
    }

    #[test]
    fn test_delete() {
        let e = entry(json!({"op": "d", "ns": "db.t", "o": {"_id": 2}}));
        assert_eq!(
            build_delete(&e).unwrap().to_sql(),
            "DELETE FROM db.t WHERE _id = 2;"
        );
    }

    #[test]
    fn test_delete_without_filter() {
        let e = entry(json!({"op": "d", "ns": "db.t"}));
        assert!(matches!(
            build_delete(&e),
            Err(OplogError::MalformedEntry { op: "delete", .. })
        ));
    }

    #[test]
    fn test_delete_with_empty_filter() {
        let e = entry(json!({"op": "d", "ns": "db.t", "o": {}}));
        assert_eq!(build_delete(&e).unwrap().to_sql(), "DELETE FROM db.t WHERE ;");
    }
}
