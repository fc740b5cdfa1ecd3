//! Output formatting: table, JSON, YAML, plain.
//!
//! The column set is only known at runtime, so table rendering goes
//! through tabled's builder API rather than the `Tabled` derive.

use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::Style;

use whereabouts_core::{FlatRow, FlatTable};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render the derived view (row indices into `table`) in the chosen format.
pub fn render_rows(
    format: OutputFormat,
    table: &FlatTable,
    view: &[usize],
) -> Result<String, CliError> {
    let rows: Vec<&FlatRow> = view.iter().filter_map(|&i| table.rows().get(i)).collect();

    match format {
        OutputFormat::Table => Ok(render_table(table, &rows)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rows).map_err(|e| CliError::Serialize(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&rows).map_err(|e| CliError::Serialize(e.to_string()))
        }
        OutputFormat::Plain => Ok(render_plain(table, &rows)),
    }
}

/// Render the column list in the chosen format.
pub fn render_columns(format: OutputFormat, columns: &[String]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(columns.join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(columns).map_err(|e| CliError::Serialize(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(columns).map_err(|e| CliError::Serialize(e.to_string()))
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode for
/// empty strings.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table(table: &FlatTable, rows: &[&FlatRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().map(String::as_str));

    for row in rows {
        // Iterate the fixed column set; cells a row lacks render blank.
        builder.push_record(
            table
                .columns()
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default()),
        );
    }

    builder.build().with(Style::rounded()).to_string()
}

/// One identifying value per line: the `city` column when present,
/// otherwise the row's first value.
fn render_plain(table: &FlatTable, rows: &[&FlatRow]) -> String {
    let city = table.columns().iter().find(|c| c.as_str() == "city");
    rows.iter()
        .map(|row| {
            city.and_then(|c| row.get(c))
                .or_else(|| row.values().next())
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
