// ── View derivation ──
//
// The displayed row sequence is a pure function of (table, view state).
// Consumers never sort or filter in place: every keystroke or header
// activation recomputes the view from the full dataset, so the result
// always reflects the value just supplied.

use std::cmp::Ordering;

use crate::model::FieldValue;
use crate::table::FlatTable;

// ── Sort direction state machine ─────────────────────────────────────

/// Sort direction for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Unsorted,
    Descending,
    Ascending,
}

impl SortDirection {
    /// Transition table for a header activation:
    /// `Unsorted → Descending → Ascending → Descending → …`
    ///
    /// There is no transition back to `Unsorted`; only reloading the
    /// dataset resets a column.
    pub fn advance(self) -> Self {
        match self {
            Self::Unsorted | Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header indicator glyph.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::Descending => "▼",
            Self::Ascending => "▲",
        }
    }
}

// ── Per-column sort state ────────────────────────────────────────────

/// Direction per column, tracked independently, plus the most recently
/// activated column -- the one the view orders by.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    directions: Vec<SortDirection>,
    active: Option<usize>,
}

impl SortState {
    /// Every discovered column starts `Unsorted`.
    pub fn new(column_count: usize) -> Self {
        Self {
            directions: vec![SortDirection::Unsorted; column_count],
            active: None,
        }
    }

    /// Activate a column: advance its direction and make it the sort key.
    /// Out-of-range indices are ignored.
    pub fn activate(&mut self, column: usize) {
        if let Some(direction) = self.directions.get_mut(column) {
            *direction = direction.advance();
            self.active = Some(column);
        }
    }

    /// Direction of one column.
    pub fn direction(&self, column: usize) -> SortDirection {
        self.directions
            .get(column)
            .copied()
            .unwrap_or(SortDirection::Unsorted)
    }

    /// The ordering column and its direction, if any column was activated.
    pub fn active(&self) -> Option<(usize, SortDirection)> {
        self.active.map(|column| (column, self.direction(column)))
    }
}

// ── View state ───────────────────────────────────────────────────────

/// Current search text and sort state. Created when a dataset loads,
/// discarded with it; nothing persists across runs.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub search: String,
    pub sort: SortState,
}

impl ViewState {
    pub fn new(column_count: usize) -> Self {
        Self {
            search: String::new(),
            sort: SortState::new(column_count),
        }
    }
}

// ── Derivation ───────────────────────────────────────────────────────

/// Derive the displayed row sequence: filter, then stable sort.
///
/// Returns indices into `table.rows()`. Filtering keeps rows whose
/// concatenated values contain the search text case-insensitively (an
/// empty search keeps everything). Sorting orders by the active column's
/// direction; ties keep input order, and rows missing the column sort
/// before every present value.
pub fn derive_view(table: &FlatTable, state: &ViewState) -> Vec<usize> {
    let needle = state.search.to_lowercase();

    let mut indices: Vec<usize> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| needle.is_empty() || FlatTable::haystack(row).contains(&needle))
        .map(|(i, _)| i)
        .collect();

    if let Some((column, direction)) = state.sort.active() {
        let Some(name) = table.columns().get(column) else {
            return indices;
        };
        indices.sort_by(|&a, &b| {
            let ord = compare_cells(
                table.value(a, name),
                table.value(b, name),
            );
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
                SortDirection::Unsorted => Ordering::Equal,
            }
        });
    }

    indices
}

fn compare_cells(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flatten::{FlatRow, flatten};

    fn row(json: &str) -> FlatRow {
        flatten(&serde_json::from_str(json).unwrap()).unwrap()
    }

    fn cities() -> FlatTable {
        FlatTable::from_rows(vec![
            row(r#"{"city":"Boston"}"#),
            row(r#"{"city":"Austin"}"#),
            row(r#"{"city":"Reno"}"#),
        ])
    }

    fn city_sequence(table: &FlatTable, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| table.value(i, "city").unwrap().to_string())
            .collect()
    }

    // ── State machine ────────────────────────────────────────────────

    #[test]
    fn direction_cycle_matches_transition_table() {
        let mut d = SortDirection::Unsorted;
        d = d.advance();
        assert_eq!(d, SortDirection::Descending);
        d = d.advance();
        assert_eq!(d, SortDirection::Ascending);
        d = d.advance();
        assert_eq!(d, SortDirection::Descending);
    }

    #[test]
    fn columns_track_directions_independently() {
        let mut sort = SortState::new(3);
        sort.activate(0); // col 0: Descending
        sort.activate(2); // col 2: Descending, now active
        sort.activate(0); // col 0 continues its own cycle: Ascending

        assert_eq!(sort.direction(0), SortDirection::Ascending);
        assert_eq!(sort.direction(1), SortDirection::Unsorted);
        assert_eq!(sort.direction(2), SortDirection::Descending);
        assert_eq!(sort.active(), Some((0, SortDirection::Ascending)));
    }

    #[test]
    fn out_of_range_activation_is_ignored() {
        let mut sort = SortState::new(1);
        sort.activate(5);
        assert_eq!(sort.active(), None);
    }

    // ── Filtering ────────────────────────────────────────────────────

    #[test]
    fn empty_search_returns_all_rows_in_order() {
        let table = cities();
        let view = derive_view(&table, &ViewState::new(table.columns().len()));
        assert_eq!(view, [0, 1, 2]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());
        state.search = "bo".into();

        let view = derive_view(&table, &state);
        assert_eq!(city_sequence(&table, &view), ["Boston"]);
    }

    #[test]
    fn filtered_view_is_a_subset_of_the_unfiltered_view() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());
        state.search = "o".into();

        let all = derive_view(&table, &ViewState::new(1));
        let filtered = derive_view(&table, &state);

        assert!(filtered.iter().all(|i| all.contains(i)));
        // Every surviving row really contains the needle.
        for &i in &filtered {
            assert!(
                FlatTable::haystack(&table.rows()[i]).contains('o'),
                "row {i} should contain the search text"
            );
        }
    }

    #[test]
    fn search_matches_across_concatenated_fields() {
        // "no52" spans city and street number -- the original joined
        // values with no separator, so this matches.
        let table = FlatTable::from_rows(vec![row(r#"{"city":"Reno","number":52}"#)]);
        let mut state = ViewState::new(table.columns().len());
        state.search = "no52".into();

        assert_eq!(derive_view(&table, &state), [0]);
    }

    // ── Sorting ──────────────────────────────────────────────────────

    #[test]
    fn first_activation_sorts_descending() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(0);

        let view = derive_view(&table, &state);
        assert_eq!(city_sequence(&table, &view), ["Reno", "Boston", "Austin"]);
    }

    #[test]
    fn second_activation_reverses_to_ascending() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(0);
        state.sort.activate(0);

        let view = derive_view(&table, &state);
        assert_eq!(city_sequence(&table, &view), ["Austin", "Boston", "Reno"]);
    }

    #[test]
    fn toggling_direction_exactly_reverses_distinct_values() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());

        state.sort.activate(0);
        let descending = derive_view(&table, &state);
        state.sort.activate(0);
        let ascending = derive_view(&table, &state);

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn sorting_preserves_the_row_multiset() {
        let table = cities();
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(0);

        let mut view = derive_view(&table, &state);
        view.sort_unstable();
        assert_eq!(view, [0, 1, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"city":"Lund","n":1}"#),
            row(r#"{"city":"Lund","n":2}"#),
            row(r#"{"city":"Ames","n":3}"#),
        ]);
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(0);
        state.sort.activate(0); // ascending

        let view = derive_view(&table, &state);
        // Ames first, then the two Lund rows in their original order.
        assert_eq!(view, [2, 0, 1]);
    }

    #[test]
    fn numeric_columns_sort_numerically() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"number":10}"#),
            row(r#"{"number":2}"#),
            row(r#"{"number":33}"#),
        ]);
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(0);
        state.sort.activate(0); // ascending

        let view = derive_view(&table, &state);
        assert_eq!(view, [1, 0, 2]);
    }

    #[test]
    fn rows_missing_the_sort_column_order_first_ascending() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"city":"Austin","state":"TX"}"#),
            row(r#"{"city":"Lyon"}"#),
        ]);
        let mut state = ViewState::new(table.columns().len());
        state.sort.activate(1); // "state"
        state.sort.activate(1); // ascending

        let view = derive_view(&table, &state);
        assert_eq!(view, [1, 0]);
    }

    #[test]
    fn filter_and_sort_compose() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"city":"Boston"}"#),
            row(r#"{"city":"Bordeaux"}"#),
            row(r#"{"city":"Reno"}"#),
        ]);
        let mut state = ViewState::new(table.columns().len());
        state.search = "bo".into();
        state.sort.activate(0);
        state.sort.activate(0); // ascending

        let view = derive_view(&table, &state);
        assert_eq!(city_sequence(&table, &view), ["Bordeaux", "Boston"]);
    }
}
