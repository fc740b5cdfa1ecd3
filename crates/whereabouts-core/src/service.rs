// ── Fetch service ──
//
// Wraps the API client behind the one operation consumers need: load
// the dataset. At-most-once per call site; there is no refresh loop,
// no retry, and no cache.

use tracing::{info, warn};

use whereabouts_api::{RandomUserClient, TransportConfig, UserQuery};
use whereabouts_api::types::UserPage;

use crate::config::FetchConfig;
use crate::convert::person_from_wire;
use crate::error::CoreError;
use crate::flatten::flatten;
use crate::model::Person;
use crate::table::FlatTable;

/// A loaded dataset: domain records, their flattened table, and the
/// generation metadata the API reported.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub people: Vec<Person>,
    pub table: FlatTable,
    pub info: FetchInfo,
}

/// Generation metadata from the API's `info` envelope.
#[derive(Debug, Clone)]
pub struct FetchInfo {
    /// Seed that reproduces this dataset when passed back.
    pub seed: String,
    /// Record count the API says it generated.
    pub generated: u32,
    /// API version string.
    pub version: String,
}

/// One-shot fetch service: API page → people → flat table.
pub struct FetchService {
    client: RandomUserClient,
    config: FetchConfig,
}

impl FetchService {
    pub fn new(config: FetchConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = RandomUserClient::new(config.endpoint.as_str(), &transport)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Perform the fetch and build the dataset.
    ///
    /// Failures propagate to the caller, which logs and continues with
    /// an empty dataset -- the UI contract is "render an empty table",
    /// not "crash" and not "retry".
    pub async fn load(&self) -> Result<Dataset, CoreError> {
        let query = UserQuery {
            results: self.config.results,
            seed: self.config.seed.clone(),
            nat: self.config.nat.clone(),
        };
        let page = self.client.fetch_users(&query).await?;
        Self::build_dataset(page)
    }

    /// Convert a wire page into the dataset. Split out so the pipeline
    /// is testable without a server.
    pub fn build_dataset(page: UserPage) -> Result<Dataset, CoreError> {
        let info = FetchInfo {
            seed: page.info.seed,
            generated: page.info.results,
            version: page.info.version,
        };

        let people: Vec<Person> = page.results.into_iter().map(person_from_wire).collect();

        let mut rows = Vec::with_capacity(people.len());
        for person in &people {
            rows.push(flatten(&person.location)?);
        }
        let table = FlatTable::from_rows(rows);

        if table.is_empty() {
            warn!(seed = %info.seed, "fetch returned zero records; table will be empty");
        } else {
            info!(
                rows = table.len(),
                columns = table.columns().len(),
                seed = %info.seed,
                "dataset loaded"
            );
        }

        Ok(Dataset { people, table, info })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(records: serde_json::Value) -> UserPage {
        serde_json::from_value(serde_json::json!({
            "results": records,
            "info": { "seed": "fixed", "results": 2, "page": 1, "version": "1.4" }
        }))
        .unwrap()
    }

    fn record(first: &str, city: &str) -> serde_json::Value {
        serde_json::json!({
            "gender": "female",
            "name": { "title": "Ms", "first": first, "last": "Example" },
            "location": {
                "street": { "number": 1, "name": "Main St" },
                "city": city,
                "coordinates": { "latitude": "0.0", "longitude": "0.0" }
            },
            "email": "x@example.com",
            "login": {
                "uuid": "550e8400-e29b-41d4-a716-446655440000",
                "username": "user"
            },
            "dob": { "date": "1990-01-01T00:00:00.000Z", "age": 36 },
            "registered": { "date": "2020-01-01T00:00:00.000Z", "age": 6 }
        })
    }

    #[test]
    fn builds_table_with_columns_from_first_record() {
        let page = page(serde_json::json!([record("Ada", "Boston"), record("Eva", "Reno")]));

        let dataset = FetchService::build_dataset(page).unwrap();

        assert_eq!(dataset.people.len(), 2);
        assert_eq!(
            dataset.table.columns(),
            ["number", "name", "city", "latitude", "longitude"]
        );
        assert_eq!(dataset.info.seed, "fixed");
    }

    #[test]
    fn zero_records_produce_an_empty_dataset() {
        let page = page(serde_json::json!([]));

        let dataset = FetchService::build_dataset(page).unwrap();

        assert!(dataset.people.is_empty());
        assert!(dataset.table.is_empty());
        assert!(dataset.table.columns().is_empty());
    }

    #[test]
    fn duplicate_leaf_names_surface_as_core_error() {
        let mut rec = record("Ada", "Boston");
        // Inject a second `name` leaf via a nested branch.
        rec["location"]["district"] = serde_json::json!({ "name": "Old Town" });
        let page = page(serde_json::json!([rec]));

        let err = FetchService::build_dataset(page).unwrap_err();
        assert!(
            matches!(err, CoreError::DuplicateColumn { ref column } if column == "name"),
            "expected DuplicateColumn, got: {err:?}"
        );
    }
}
