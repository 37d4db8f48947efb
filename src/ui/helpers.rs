//! Helper functions for UI operations.
//!
//! Spawns the background task behind every load and converts panics in
//! that task into events so the in-flight request is always settled.

use crate::app::{App, AppEvent};
use crate::state::LoadTicket;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Spawn the fetch for `ticket` and report back through `event_tx`.
///
/// Replaces `app.load_handle`. Callers that supersede a request abort the
/// old handle first (see `App::select_category`).
pub(super) fn spawn_news_load(
    app: &mut App,
    ticket: LoadTicket,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let client = Arc::clone(&app.client);
    let tx = event_tx.clone();

    tracing::debug!(
        token = ticket.token,
        mode = ?ticket.mode,
        page = ticket.page,
        "Spawning news load task"
    );

    app.load_handle = Some(tokio::spawn(async move {
        let outcome =
            catch_task_panic(client.search(&ticket.query, ticket.max, ticket.page)).await;
        let event = match outcome {
            Ok(result) => AppEvent::NewsLoaded { ticket, result },
            Err(error) => {
                tracing::error!(error = %error, "News load task panicked");
                AppEvent::TaskPanicked {
                    task: "news_load",
                    ticket,
                    error,
                }
            }
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send load result (receiver dropped)");
        }
    }));
}

/// Spawn `ticket` if there is one. Returns whether a load started.
pub(super) fn start_load(
    app: &mut App,
    ticket: Option<LoadTicket>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> bool {
    match ticket {
        Some(ticket) => {
            spawn_news_load(app, ticket, event_tx);
            true
        }
        None => false,
    }
}
