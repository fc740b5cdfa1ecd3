// whereabouts-core: data layer between whereabouts-api and consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod model;
pub mod service;
pub mod table;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::FetchConfig;
pub use error::CoreError;
pub use flatten::{FlatRow, FlattenError, flatten};
pub use model::{FieldValue, Person};
pub use service::{Dataset, FetchInfo, FetchService};
pub use table::FlatTable;
pub use view::{SortDirection, SortState, ViewState, derive_view};
