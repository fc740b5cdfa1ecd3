//! Fetch bridge — runs the single fetch in a background task.
//!
//! The UI never awaits the network directly: the bridge performs the
//! one `FetchService::load` and forwards the outcome as an [`Action`].
//! There is no retry and no refresh; a failure leaves the table empty.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use whereabouts_core::FetchService;

use crate::action::Action;

/// Perform the one fetch and report the outcome to the action channel.
pub async fn spawn_fetch_bridge(
    service: FetchService,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    tokio::select! {
        () = cancel.cancelled() => {
            debug!("fetch cancelled before completion");
        }
        result = service.load() => match result {
            Ok(dataset) => {
                debug!(rows = dataset.table.len(), "fetch complete");
                let _ = action_tx.send(Action::DatasetLoaded(std::sync::Arc::new(dataset)));
            }
            Err(e) => {
                // The UI contract: log it, render an empty table.
                warn!(error = %e, "fetch failed; continuing with empty dataset");
                let _ = action_tx.send(Action::FetchFailed(e.to_string()));
            }
        }
    }
}
