//! `whereabouts columns` — fetch one page and print the discovered
//! column set, in first-encounter order.

use whereabouts_core::FetchService;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(service: &FetchService, global: &GlobalOpts) -> Result<(), CliError> {
    let dataset = service.load().await?;

    if dataset.table.columns().is_empty() {
        tracing::warn!("zero records fetched; no columns to show");
    }

    let rendered = output::render_columns(global.output, dataset.table.columns())?;
    output::print_output(&rendered);
    Ok(())
}
