// ── Recursive location flattening ──
//
// Collapses a nested key/value tree into a single level by promoting
// descendant leaf fields to the top, keyed by their own field name (not
// a dotted path). A leaf name appearing twice across branches is an
// error: silently keeping one of the two values would drop data.

use indexmap::IndexMap;
use thiserror::Error;

use whereabouts_api::types::{NestedObject, NestedValue};

use crate::model::FieldValue;

/// One flattened row: ordered mapping of column name to primitive value.
pub type FlatRow = IndexMap<String, FieldValue>;

/// Failure while flattening one record's location tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// The same leaf field name occurred on two different branches.
    #[error("duplicate field name '{key}' in nested location data")]
    DuplicateKey { key: String },
}

/// Flatten a nested object into a single-level row.
///
/// Leaves are merged in traversal order (document order), so the key
/// sequence of the result is the first-encounter order of leaf names.
pub fn flatten(object: &NestedObject) -> Result<FlatRow, FlattenError> {
    let mut row = FlatRow::with_capacity(object.len());
    flatten_into(object, &mut row)?;
    Ok(row)
}

fn flatten_into(object: &NestedObject, out: &mut FlatRow) -> Result<(), FlattenError> {
    for (key, value) in object {
        let leaf = match value {
            NestedValue::Object(inner) => {
                flatten_into(inner, out)?;
                continue;
            }
            NestedValue::Number(n) => FieldValue::Number(*n),
            NestedValue::Text(s) => FieldValue::Text(s.clone()),
            NestedValue::Bool(b) => FieldValue::Text(b.to_string()),
        };
        if out.insert(key.clone(), leaf).is_some() {
            return Err(FlattenError::DuplicateKey { key: key.clone() });
        }
    }
    Ok(())
}
