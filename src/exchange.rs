// ABOUTME: Send/receive exchange — stages a query, settles the response.
// ABOUTME: Every failure becomes one bot transcript entry; nothing is fatal.

use crate::client::{ChatBackend, ChatError};
use crate::config::EndpointConfig;
use crate::transcript::{MessageId, Sender};
use crate::tui::state::WidgetState;

/// A send that has been staged in the transcript and is waiting for its
/// network call to settle.
#[derive(Debug)]
pub struct PendingSend {
    pub placeholder: MessageId,
    pub query: String,
}

/// A settled send, reported back to the event loop by the spawned task.
pub struct SettledSend {
    pub pending: PendingSend,
    pub result: Result<String, ChatError>,
}

/// Stage a query for sending: echo it as a user message, clear the input,
/// and append a loading placeholder.
///
/// Returns `None` without touching the transcript for whitespace-only
/// queries, and `None` after appending a single bot error for an
/// unconfigured endpoint. In both cases no network call must be made.
///
/// Multiple pending sends may be staged at once; each gets its own
/// placeholder and settles independently.
pub fn begin_send(
    state: &mut WidgetState,
    endpoint: &EndpointConfig,
    query: &str,
) -> Option<PendingSend> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if !endpoint.is_configured() {
        state.push_message(
            "Error: the chat API endpoint is not configured.",
            Sender::Bot,
        );
        return None;
    }

    state.push_message(query, Sender::User);
    state.input.clear();
    state.cursor_pos = 0;
    let placeholder = state.push_loading();
    state.in_flight += 1;

    Some(PendingSend {
        placeholder,
        query: query.to_string(),
    })
}

/// Settle a staged send: drop its loading placeholder if still present and
/// append exactly one terminal bot message, answer or error.
pub fn finish_send(
    state: &mut WidgetState,
    pending: PendingSend,
    result: &Result<String, ChatError>,
) {
    state.remove_message(pending.placeholder);
    state.in_flight = state.in_flight.saturating_sub(1);

    match result {
        Ok(answer) => {
            state.push_message(answer.clone(), Sender::Bot);
        }
        Err(e) => {
            state.push_message(format!("Sorry, I encountered an error: {e}"), Sender::Bot);
        }
    }
}

/// Drive one full exchange to completion.
///
/// The transcript goes through the same states as the event-driven path;
/// this form exists so callers and tests can await the whole cycle
/// deterministically. Returns the settled network result, or `None` when
/// the query was rejected before any call was made.
pub async fn run_exchange(
    state: &mut WidgetState,
    client: &dyn ChatBackend,
    endpoint: &EndpointConfig,
    query: &str,
) -> Option<Result<String, ChatError>> {
    let pending = begin_send(state, endpoint, query)?;
    let result = client.ask(&pending.query).await;
    finish_send(state, pending, &result);
    Some(result)
}
