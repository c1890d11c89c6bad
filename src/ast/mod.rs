pub mod entry;
pub mod values;

pub use self::entry::{Diff, Document, OplogEntry, Operation};
pub use self::values::{PRIMARY_KEY_COLUMN, Value};
