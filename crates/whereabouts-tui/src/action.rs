//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use whereabouts_core::Dataset;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data (from the fetch bridge) ───────────────────────────────
    /// The one fetch succeeded.
    DatasetLoaded(Arc<Dataset>),
    /// The one fetch failed; the table stays empty.
    FetchFailed(String),

    // ── Search ─────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Table ──────────────────────────────────────────────────────
    /// Advance the sort state of a column (header click or `s`).
    SortColumn(usize),

    // ── Help ───────────────────────────────────────────────────────
    ToggleHelp,
}
