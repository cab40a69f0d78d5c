// ABOUTME: Integration tests for the send/receive exchange with a stub backend.
// ABOUTME: Drives full cycles deterministically and checks transcript properties.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sidechat::client::{ChatBackend, ChatError};
use sidechat::config::EndpointConfig;
use sidechat::exchange::{begin_send, finish_send, run_exchange};
use sidechat::transcript::Sender;
use sidechat::tui::state::WidgetState;

/// What the stub backend should do when asked.
enum StubReply {
    Answer(&'static str),
    Status(u16, Option<&'static str>),
    NetworkDown,
}

/// In-memory ChatBackend that counts calls and replays a canned outcome.
struct StubBackend {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubBackend {
    fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    async fn ask(&self, _query: &str) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Answer(text) => Ok((*text).to_string()),
            StubReply::Status(status, detail) => Err(ChatError::Api {
                status: *status,
                detail: detail.map(str::to_string),
            }),
            StubReply::NetworkDown => {
                Err(ChatError::Transport("connection refused".to_string()))
            }
        }
    }
}

fn configured() -> EndpointConfig {
    EndpointConfig {
        base_url: "https://assistant.example.com".to_string(),
        api_key: None,
    }
}

fn count(state: &WidgetState, sender: Sender) -> usize {
    state
        .transcript
        .entries()
        .iter()
        .filter(|m| m.sender == sender)
        .count()
}

/// A successful exchange appends exactly one user message and one terminal
/// bot message, with no loading placeholder left behind.
#[tokio::test]
async fn successful_exchange_appends_one_user_and_one_bot_message() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Answer("Hi there"));

    let outcome = run_exchange(&mut state, &backend, &configured(), "hello").await;
    assert!(matches!(outcome, Some(Ok(_))));

    assert_eq!(backend.calls(), 1);
    assert_eq!(count(&state, Sender::User), 1);
    assert_eq!(count(&state, Sender::Bot), 1);
    assert_eq!(count(&state, Sender::Loading), 0);

    let last = state.transcript.last().unwrap();
    assert_eq!(last.text, "Hi there");
    assert_eq!(last.sender, Sender::Bot);
}

/// Whitespace-only input appends nothing and issues no network call.
#[tokio::test]
async fn whitespace_query_appends_nothing_and_makes_no_call() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Answer("unused"));

    let outcome = run_exchange(&mut state, &backend, &configured(), "  \t  ").await;
    assert!(outcome.is_none());
    assert_eq!(backend.calls(), 0);
    assert!(state.transcript.is_empty());
}

/// An unconfigured endpoint produces a single bot error and no network call.
#[tokio::test]
async fn unconfigured_endpoint_reports_error_without_calling() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Answer("unused"));

    let outcome =
        run_exchange(&mut state, &backend, &EndpointConfig::default(), "hello").await;
    assert!(outcome.is_none());
    assert_eq!(backend.calls(), 0);

    assert_eq!(state.transcript.len(), 1);
    let entry = state.transcript.last().unwrap();
    assert_eq!(entry.sender, Sender::Bot);
    assert!(entry.text.contains("not configured"));

    // The widget stays usable: a configured send afterwards still works.
    let backend = StubBackend::new(StubReply::Answer("recovered"));
    run_exchange(&mut state, &backend, &configured(), "retry").await;
    assert_eq!(state.transcript.last().unwrap().text, "recovered");
}

/// A non-2xx response surfaces the server-provided detail.
#[tokio::test]
async fn http_error_detail_reaches_the_transcript() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Status(500, Some("Internal error")));

    run_exchange(&mut state, &backend, &configured(), "hello").await;

    let last = state.transcript.last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert!(last.text.contains("Internal error"));
    assert_eq!(count(&state, Sender::Loading), 0);
}

/// A non-2xx response without a detail body falls back to a status-derived
/// message.
#[tokio::test]
async fn http_error_without_detail_reports_status() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Status(502, None));

    run_exchange(&mut state, &backend, &configured(), "hello").await;

    let last = state.transcript.last().unwrap();
    assert!(last.text.contains("502"));
}

/// A transport failure surfaces its description as a bot message.
#[tokio::test]
async fn network_failure_description_reaches_the_transcript() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::NetworkDown);

    run_exchange(&mut state, &backend, &configured(), "hello").await;

    let last = state.transcript.last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert!(last.text.contains("connection refused"));
}

/// Two sends staged before either settles keep independent placeholders,
/// and each terminal message lands after its own user echo.
#[tokio::test]
async fn concurrent_sends_settle_independently() {
    let mut state = WidgetState::new("e".to_string());
    let backend = StubBackend::new(StubReply::Answer("answer"));

    let first = begin_send(&mut state, &configured(), "one").unwrap();
    let second = begin_send(&mut state, &configured(), "two").unwrap();
    assert_eq!(count(&state, Sender::Loading), 2);

    // Settle in reverse order, as network responses may arrive.
    let result = backend.ask(&second.query).await;
    finish_send(&mut state, second, &result);
    let result = backend.ask(&first.query).await;
    finish_send(&mut state, first, &result);

    assert_eq!(backend.calls(), 2);
    assert_eq!(count(&state, Sender::User), 2);
    assert_eq!(count(&state, Sender::Bot), 2);
    assert_eq!(count(&state, Sender::Loading), 0);
}

/// Errors are per-request: a failed exchange leaves the widget ready for
/// the next one.
#[tokio::test]
async fn widget_remains_usable_after_an_error() {
    let mut state = WidgetState::new("e".to_string());

    let failing = StubBackend::new(StubReply::NetworkDown);
    run_exchange(&mut state, &failing, &configured(), "first").await;

    let working = StubBackend::new(StubReply::Answer("second answer"));
    run_exchange(&mut state, &working, &configured(), "second").await;

    let last = state.transcript.last().unwrap();
    assert_eq!(last.text, "second answer");
    assert_eq!(count(&state, Sender::User), 2);
    assert_eq!(count(&state, Sender::Bot), 2);
}
