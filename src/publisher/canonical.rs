//! Pre-write canonicalization
//!
//! The normalizer already nulls missing values; this pass catches any
//! empty string that still reaches the publisher so the stored record
//! never distinguishes "empty" from "absent".

use serde_json::Value;

use crate::normalizer::Row;

/// Replace every empty-string field value with null.
pub fn canonicalize_nulls(mut row: Row) -> Row {
    for (_, value) in row.iter_mut() {
        if matches!(value, Value::String(s) if s.is_empty()) {
            *value = Value::Null;
        }
    }
    row
}
