//! Subcommand handlers.

pub mod columns;
pub mod config_cmd;
pub mod fetch;

use whereabouts_core::FetchService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a fetch-backed command. `Command::Config` is handled in
/// `main` before a service is built.
pub async fn dispatch(
    command: Command,
    service: &FetchService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Fetch(args) => fetch::handle(&args, service, global).await,
        Command::Columns => columns::handle(service, global).await,
        Command::Config(_) => unreachable!("config is dispatched before service construction"),
    }
}
