use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::ast::Value;
use crate::error::{OplogError, OplogResult};

/// Column name → value. Ordered, so every generator walks columns ascending.
pub type Document = BTreeMap<String, Value>;

/// The mutation an oplog entry describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    /// `"i"`
    Insert,
    /// `"u"`
    Update,
    /// `"d"`
    Delete,
    /// Anything else (no-ops, commands, a missing `op`). Translates to nothing.
    Unknown(String),
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Unknown(String::new())
    }
}

impl Operation {
    /// Human readable name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Unknown(_) => "unknown",
        }
    }
}

impl From<String> for Operation {
    fn from(op: String) -> Self {
        match op.as_str() {
            "i" => Operation::Insert,
            "u" => Operation::Update,
            "d" => Operation::Delete,
            _ => Operation::Unknown(op),
        }
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Insert => write!(f, "i"),
            Operation::Update => write!(f, "u"),
            Operation::Delete => write!(f, "d"),
            Operation::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Field-level change carried by an update entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// `diff.u`: columns set to new values.
    Set(Document),
    /// `diff.d`: columns unset (become NULL).
    Unset(Vec<String>),
}

/// One change-log record.
///
/// Every field defaults when absent; what an operation actually needs is
/// checked by the accessors at generation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OplogEntry {
    #[serde(default)]
    pub op: Operation,
    #[serde(default)]
    pub ns: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o2: Option<Map<String, serde_json::Value>>,
}

impl OplogEntry {
    /// Schema part of the namespace: everything before the first `.`.
    pub fn schema(&self) -> &str {
        self.ns.split('.').next().unwrap_or_default()
    }

    /// The namespace, or an error if the entry has none.
    pub fn namespace(&self) -> OplogResult<&str> {
        if self.ns.is_empty() {
            return Err(OplogError::malformed(self.op.name(), "missing namespace 'ns'"));
        }
        Ok(&self.ns)
    }

    /// Inserted document (`o`). Present but empty is allowed.
    pub fn document(&self) -> OplogResult<Document> {
        match &self.o {
            Some(o) => Ok(to_document(o)),
            None => Err(OplogError::malformed(self.op.name(), "missing document 'o'")),
        }
    }

    /// Row filter: `o2` for updates, `o` for deletes. Present but empty is allowed.
    pub fn filter(&self) -> OplogResult<Document> {
        let (source, field) = match self.op {
            Operation::Update => (&self.o2, "o2"),
            _ => (&self.o, "o"),
        };
        match source {
            Some(filter) => Ok(to_document(filter)),
            None => Err(OplogError::malformed(
                self.op.name(),
                format!("missing filter '{}'", field),
            )),
        }
    }

    /// Update diff from `o.diff`. `u` takes precedence over `d`.
    pub fn diff(&self) -> OplogResult<Diff> {
        let diff = self
            .o
            .as_ref()
            .and_then(|o| o.get("diff"))
            .and_then(|d| d.as_object())
            .ok_or_else(|| {
                OplogError::InvalidUpdate("'o.diff' is missing or not a mapping".into())
            })?;

        if let Some(set) = diff.get("u").and_then(|u| u.as_object()) {
            return Ok(Diff::Set(to_document(set)));
        }
        if let Some(unset) = diff.get("d").and_then(|d| d.as_object()) {
            return Ok(Diff::Unset(unset.keys().cloned().collect()));
        }
        Err(OplogError::InvalidUpdate(
            "'o.diff' has neither a 'u' nor a 'd' mapping".into(),
        ))
    }
}

impl Diff {
    /// True when the diff touches no column.
    pub fn is_empty(&self) -> bool {
        match self {
            Diff::Set(doc) => doc.is_empty(),
            Diff::Unset(cols) => cols.is_empty(),
        }
    }
}

fn to_document(map: &Map<String, serde_json::Value>) -> Document {
    map.iter()
        .map(|(k, v)| (k.clone(), Value::from(v.clone())))
        .collect()
}
