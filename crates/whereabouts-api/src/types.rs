// Wire types for the randomuser.me API.
//
// The response envelope is `{ "results": [...], "info": {...} }`. Each
// record's `location` is kept as an order-preserving nested tree rather
// than a fixed struct: downstream flattening derives table columns from
// whatever shape the first record carries.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use uuid::Uuid;

// ── Nested values ────────────────────────────────────────────────────

/// An ordered mapping of field name to nested value.
pub type NestedObject = IndexMap<String, NestedValue>;

/// A value inside a record's `location` tree: a primitive leaf or a
/// nested object. Arrays do not occur in this API.
///
/// Untagged, so deserialization preserves the document's field order
/// through the `IndexMap` backing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NestedValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Object(NestedObject),
}

// ── Response envelope ────────────────────────────────────────────────

/// One page of generated users: the `results` array plus the `info`
/// envelope describing how it was generated.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub results: Vec<UserRecord>,
    pub info: PageInfo,
}

/// Generation metadata. `seed` can be passed back to reproduce the page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub seed: String,
    pub results: u32,
    pub page: u32,
    pub version: String,
}

// ── Records ──────────────────────────────────────────────────────────

/// One generated user. Only `location` feeds the table; the sibling
/// fields are parsed for the domain model but never flattened.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub gender: Option<String>,
    pub name: NameParts,
    pub location: NestedObject,
    pub email: String,
    pub login: LoginInfo,
    pub dob: DatedAge,
    pub registered: DatedAge,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cell: Option<String>,
    #[serde(default)]
    pub nat: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameParts {
    pub title: String,
    pub first: String,
    pub last: String,
}

/// Login identity. The API also sends password/hash fields; we only
/// keep what identifies the record.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInfo {
    pub uuid: Uuid,
    pub username: String,
}

/// A timestamp with the API's precomputed age in years.
#[derive(Debug, Clone, Deserialize)]
pub struct DatedAge {
    pub date: DateTime<Utc>,
    pub age: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn nested_value_preserves_field_order() {
        let json = r#"{"street":{"number":52,"name":"Elm"},"city":"Reno","state":"NV"}"#;
        let obj: NestedObject = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["street", "city", "state"]);
    }

    #[test]
    fn nested_value_accepts_numeric_and_string_postcodes() {
        let numeric: NestedObject = serde_json::from_str(r#"{"postcode":90210}"#).unwrap();
        assert_eq!(numeric.get("postcode"), Some(&NestedValue::Number(90210.0)));

        let text: NestedObject = serde_json::from_str(r#"{"postcode":"EC1A 1BB"}"#).unwrap();
        assert_eq!(
            text.get("postcode"),
            Some(&NestedValue::Text("EC1A 1BB".into()))
        );
    }
}
