// ABOUTME: App orchestrator — wires config, chat client, and the TUI event loop.
// ABOUTME: Owns the terminal; spawns one task per send so the UI never blocks.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::execute;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::client::{ChatBackend, ChatClient};
use crate::config::Config;
use crate::exchange::{self, PendingSend, SettledSend};
use crate::tui::input::{self, InputResult};
use crate::tui::state::WidgetState;
use crate::tui::ui;

/// How often the loading animation advances.
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Top-level application. Construct once with the resolved configuration,
/// then `run` until the user quits.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the application: set up the terminal, drive the event loop,
    /// and restore the terminal on the way out.
    pub async fn run(self) -> anyhow::Result<()> {
        let client: Arc<dyn ChatBackend> = Arc::new(ChatClient::new(&self.config.endpoint)?);
        let mut state = WidgetState::new(self.config.endpoint.display_label());

        let mut terminal = ratatui::init();
        let _ = execute!(std::io::stdout(), EnableMouseCapture);

        let result = run_loop(&mut terminal, &mut state, client, &self.config).await;

        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }
}

/// The single-threaded event loop. All widget state is owned here; spawned
/// send tasks only report back over the settled-send channel, so every
/// transcript mutation happens between awaits on this task.
async fn run_loop(
    terminal: &mut DefaultTerminal,
    state: &mut WidgetState,
    client: Arc<dyn ChatBackend>,
    config: &Config,
) -> anyhow::Result<()> {
    let (settled_tx, mut settled_rx) = mpsc::channel::<SettledSend>(16);
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match input::handle_key(state, key) {
                            InputResult::Quit => break,
                            InputResult::Toggle => state.toggle_panel(),
                            InputResult::Send(text) => {
                                if let Some(pending) =
                                    exchange::begin_send(state, &config.endpoint, &text)
                                {
                                    spawn_send(client.clone(), pending, settled_tx.clone());
                                }
                            }
                            InputResult::None => {}
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        if input::handle_mouse(state, mouse) == InputResult::Toggle {
                            state.toggle_panel();
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(settled) = settled_rx.recv() => {
                exchange::finish_send(state, settled.pending, &settled.result);
            }
            _ = ticker.tick() => {
                state.tick();
            }
        }
    }

    Ok(())
}

/// Issue one network call in the background and report the settled result.
/// The UI stays responsive while the call is outstanding; dropping the
/// receiver (quit) simply discards late results.
fn spawn_send(client: Arc<dyn ChatBackend>, pending: PendingSend, tx: mpsc::Sender<SettledSend>) {
    tokio::spawn(async move {
        let result = client.ask(&pending.query).await;
        let _ = tx.send(SettledSend { pending, result }).await;
    });
}
