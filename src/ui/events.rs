//! Application event handling.
//!
//! Processes completions from background load tasks.

use crate::app::{App, AppEvent};
use crate::state::Completion;

/// Handle an event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::NewsLoaded { ticket, result } => {
            let token = ticket.token;
            let completion = app.apply_news(ticket, result);
            match completion {
                Completion::Stale => {
                    tracing::debug!(token, "Dropped superseded load result");
                }
                other => {
                    tracing::debug!(token, completion = ?other, "Load applied");
                }
            }
        }
        AppEvent::TaskPanicked {
            task,
            ticket,
            error,
        } => {
            tracing::error!(task, error = %error, "Background task panicked");
            let message = format!("Internal error in {} task", task);
            if app.apply_news(ticket, Err(message.clone())) != Completion::Stale {
                app.set_status(message);
            }
        }
    }
    app.needs_redraw = true;
}
