// ABOUTME: Main TUI rendering function — header, chat area, input, status bar.
// ABOUTME: Collapsed panels render the header row only.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::WidgetState;
use crate::tui::widgets::chat::render_chat_lines;
use crate::tui::widgets::status::status_line;

/// Width of the toggle control at the right edge of the header row.
pub const TOGGLE_BUTTON_WIDTH: u16 = 3;

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut WidgetState) {
    let area = frame.area();

    if !state.panel_open {
        // Collapsed: header row only, rest of the screen left blank.
        render_header(frame, state, Rect { height: area.height.min(1), ..area });
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Chat area
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, chunks[0]);

    // Chat area
    let chat_lines = render_chat_lines(state.transcript.entries(), state.spinner_frame);

    let chat_chunk = chunks[1];
    let visible_height = chat_chunk.height;

    // Use ratatui's own line_count() to get an accurate wrapped line count
    // that exactly matches its internal rendering. This prevents scroll
    // miscalculations that could hide the bottom of chat content.
    let chat_paragraph = Paragraph::new(chat_lines).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(chat_chunk.width) as u16;
    let max_scroll = total_lines.saturating_sub(visible_height);

    // Cap scroll_offset so it can't go past the top of the content.
    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(state.scroll_offset);

    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_chunk);

    // Input area
    let input_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
    let input = Paragraph::new(Span::raw(state.input.clone())).block(input_block);
    let input_chunk = chunks[2];
    frame.render_widget(input, input_chunk);

    // Cursor position inside the input row.
    if input_chunk.width > 0 && input_chunk.height > 1 {
        state.clamp_cursor();

        // Visual (display) width of the text before the cursor.
        let prefix: String = state.input.chars().take(state.cursor_pos).collect();
        let visual_col = UnicodeWidthStr::width(prefix.as_str());

        let max_visual_col = input_chunk.width.saturating_sub(1) as usize;
        let clamped_visual_col = visual_col.min(max_visual_col);

        let cursor_x = input_chunk.x.saturating_add(clamped_visual_col as u16);
        // +1 for the top border.
        let cursor_y = input_chunk.y.saturating_add(1);
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    // Status bar
    let status = status_line(
        &state.endpoint_label,
        state.transcript.len(),
        state.in_flight,
    );
    frame.render_widget(Paragraph::new(status), chunks[3]);
}

/// Render the header row: title on the left, toggle control at the right
/// edge. The control shows the action a click would perform.
fn render_header(frame: &mut Frame, state: &WidgetState, area: Rect) {
    if area.height == 0 {
        return;
    }

    let title = Line::from(Span::styled(
        " sidechat",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);

    let button = if state.panel_open { "[-]" } else { "[+]" };
    if area.width >= TOGGLE_BUTTON_WIDTH {
        let button_area = Rect {
            x: area.x + area.width - TOGGLE_BUTTON_WIDTH,
            y: area.y,
            width: TOGGLE_BUTTON_WIDTH,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(button, Style::default().fg(Color::DarkGray))),
            button_area,
        );
    }
}
