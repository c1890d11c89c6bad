//! Oplog input parsing.
//!
//! Two top-level shapes are accepted for one batch:
//!
//! ```text
//! [{"op": "i", "ns": "db.t", "o": {...}}, {"op": "u", ...}]   array of entries
//! {"op": "d", "ns": "db.t", "o": {"_id": 1}}                  single entry
//! ```
//!
//! [`parse_lines`] additionally reads JSON Lines dumps, one entry per line.

use crate::ast::OplogEntry;
use crate::error::{OplogError, OplogResult};

/// Parse a batch: an array of entries, or failing that a single entry.
pub fn parse(input: &str) -> OplogResult<Vec<OplogEntry>> {
    if let Ok(entries) = serde_json::from_str::<Vec<OplogEntry>>(input) {
        return Ok(entries);
    }
    let entry: OplogEntry = serde_json::from_str(input)?;
    Ok(vec![entry])
}

/// Parse JSON Lines: every non-blank line is one entry of the same batch.
pub fn parse_lines(input: &str) -> OplogResult<Vec<OplogEntry>> {
    let mut entries = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(line).map_err(|e| OplogError::Parse {
            line: i + 1,
            column: e.column(),
            message: e.to_string(),
        })?;
        entries.push(entry);
    }
    Ok(entries)
}
