// ABOUTME: Status bar widget — renders endpoint, message count, and send state.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Render the status bar line with endpoint, transcript size, and the
/// number of outstanding sends.
pub fn status_line(endpoint: &str, message_count: usize, in_flight: usize) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(format!(" {} ", endpoint), Style::default().fg(Color::Cyan)),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} ", format_messages(message_count)),
            Style::default().fg(Color::White),
        ),
    ];

    if in_flight > 0 {
        spans.push(Span::styled("| ", dim));
        let label = if in_flight == 1 {
            "sending... ".to_string()
        } else {
            format!("sending... ({in_flight}) ")
        };
        spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
    }

    Line::from(spans)
}

fn format_messages(count: usize) -> String {
    if count == 1 {
        "1 message".to_string()
    } else {
        format!("{count} messages")
    }
}
