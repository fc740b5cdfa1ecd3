//! `whereabouts fetch` — the one-shot pipeline: fetch, flatten, derive,
//! render.

use owo_colors::OwoColorize;

use whereabouts_core::{FetchService, FlatTable, ViewState, derive_view};

use crate::cli::{FetchArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    args: &FetchArgs,
    service: &FetchService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let dataset = service.load().await?;
    let table = &dataset.table;

    let mut state = ViewState::new(table.columns().len());
    if let Some(ref search) = args.search {
        state.search.clone_from(search);
    }
    if let Some(ref spec) = args.sort_by {
        apply_sort_spec(&mut state, table, spec)?;
    }

    let view = derive_view(table, &state);
    let rendered = output::render_rows(global.output, table, &view)?;
    output::print_output(&rendered);

    // Summary goes to stderr so piped output stays clean.
    if !global.quiet && global.output == OutputFormat::Table {
        let summary = format!(
            "{} of {} rows · {} columns · seed {}",
            view.len(),
            table.len(),
            table.columns().len(),
            dataset.info.seed
        );
        eprintln!("{}", summary.dimmed());
    }

    Ok(())
}

/// Parse `COLUMN`, `COLUMN:asc`, or `COLUMN:desc` and drive the sort
/// state machine accordingly. A bare column name means descending --
/// the same direction the first header activation produces.
fn apply_sort_spec(
    state: &mut ViewState,
    table: &FlatTable,
    spec: &str,
) -> Result<(), CliError> {
    let (name, direction) = match spec.split_once(':') {
        Some((name, direction)) => (name, Some(direction)),
        None => (spec, None),
    };

    let Some(index) = table.column_index(name) else {
        return Err(CliError::UnknownColumn {
            column: name.to_owned(),
            available: table.columns().join(", "),
        });
    };

    match direction {
        None | Some("desc") => state.sort.activate(index),
        Some("asc") => {
            state.sort.activate(index);
            state.sort.activate(index);
        }
        Some(other) => {
            return Err(CliError::Validation {
                field: "sort-by".into(),
                reason: format!("direction must be 'asc' or 'desc', got '{other}'"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use whereabouts_core::{FlatTable, SortDirection, ViewState, flatten};

    use super::apply_sort_spec;

    fn table() -> FlatTable {
        let row =
            flatten(&serde_json::from_str(r#"{"city":"Reno","state":"NV"}"#).unwrap()).unwrap();
        FlatTable::from_rows(vec![row])
    }

    #[test]
    fn bare_column_sorts_descending() {
        let table = table();
        let mut state = ViewState::new(2);
        apply_sort_spec(&mut state, &table, "city").unwrap();
        assert_eq!(state.sort.active(), Some((0, SortDirection::Descending)));
    }

    #[test]
    fn asc_suffix_sorts_ascending() {
        let table = table();
        let mut state = ViewState::new(2);
        apply_sort_spec(&mut state, &table, "state:asc").unwrap();
        assert_eq!(state.sort.active(), Some((1, SortDirection::Ascending)));
    }

    #[test]
    fn unknown_column_lists_available_ones() {
        let table = table();
        let mut state = ViewState::new(2);
        let err = apply_sort_spec(&mut state, &table, "planet").unwrap_err();
        let message = format!("{err:?}");
        assert!(message.contains("planet"), "got: {message}");
    }

    #[test]
    fn bad_direction_is_a_usage_error() {
        let table = table();
        let mut state = ViewState::new(2);
        assert!(apply_sort_spec(&mut state, &table, "city:sideways").is_err());
    }
}
