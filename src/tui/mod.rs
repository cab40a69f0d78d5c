// ABOUTME: TUI module — ratatui full-screen interface for sidechat.
// ABOUTME: Chat display, input handling, panel toggling, and the status bar.

pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

pub use state::*;
