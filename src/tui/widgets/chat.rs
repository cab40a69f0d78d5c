// ABOUTME: Chat widget — renders transcript messages into styled ratatui Lines.
// ABOUTME: Each sender (user, bot, loading) has distinct visual styling.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::transcript::{Message, Sender};

/// Animation frames for the indeterminate loading indicator.
pub const LOADING_FRAMES: [&str; 4] = ["·", "··", "···", "··"];

/// Render a slice of transcript messages into styled Lines for display.
/// `spinner_frame` selects the current loading animation frame.
pub fn render_chat_lines(messages: &[Message], spinner_frame: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (idx, msg) in messages.iter().enumerate() {
        // Blank separator line between entries.
        if idx > 0 {
            lines.push(Line::from(""));
        }

        match msg.sender {
            Sender::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "❯ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(msg.text.clone()),
                ]));
            }
            Sender::Bot => {
                // First line gets the prefix, subsequent lines are plain.
                let content_lines: Vec<&str> = msg.text.split('\n').collect();
                for (i, text) in content_lines.iter().enumerate() {
                    if i == 0 {
                        lines.push(Line::from(vec![
                            Span::styled(
                                "⏺ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::raw(text.to_string()),
                        ]));
                    } else {
                        lines.push(Line::from(Span::raw(text.to_string())));
                    }
                }
            }
            Sender::Loading => {
                let frame = LOADING_FRAMES[spinner_frame % LOADING_FRAMES.len()];
                lines.push(Line::from(Span::styled(
                    format!("⏺ {frame}"),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }
    }

    lines
}
