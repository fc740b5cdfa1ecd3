// ── Person entity ──

use chrono::{DateTime, Utc};
use uuid::Uuid;

use whereabouts_api::types::NestedObject;

/// One generated user.
///
/// `location` is the nested tree the flattener consumes. The sibling
/// identity fields are kept from the record but never flattened and
/// never shown in the table.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: Uuid,
    pub username: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub born: DateTime<Utc>,
    pub age: u32,
    pub registered: DateTime<Utc>,
    pub phone: Option<String>,
    pub cell: Option<String>,
    pub location: NestedObject,
}

impl Person {
    /// `"First Last"`, the form used in logs and detail output.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
