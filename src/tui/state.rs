// ABOUTME: Widget state — transcript, input buffer, panel visibility, and
// ABOUTME: in-flight send tracking. Drives rendering and input handling.

use crate::transcript::{MessageId, Sender, Transcript};

/// Full widget state, constructed once at startup and owned by the event
/// loop. No ambient globals; everything the UI shows lives here.
pub struct WidgetState {
    pub transcript: Transcript,
    pub input: String,
    pub cursor_pos: usize,
    /// Lines scrolled up from the bottom of the chat area (0 = pinned to
    /// the newest entry).
    pub scroll_offset: u16,
    /// Whether the chat panel is expanded. Collapsed shows the header only.
    pub panel_open: bool,
    /// Number of sends currently outstanding. More than one is allowed.
    pub in_flight: usize,
    /// Animation frame for loading placeholders, advanced by the tick.
    pub spinner_frame: usize,
    /// Endpoint label shown in the status bar.
    pub endpoint_label: String,
}

impl WidgetState {
    /// Create a new empty widget state. The panel starts open.
    pub fn new(endpoint_label: String) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            panel_open: true,
            in_flight: 0,
            spinner_frame: 0,
            endpoint_label,
        }
    }

    /// Append a message to the transcript and reset scroll to bottom so
    /// the newest entry is visible.
    pub fn push_message(&mut self, text: impl Into<String>, sender: Sender) -> MessageId {
        let id = self.transcript.append(text, sender);
        self.scroll_offset = 0;
        id
    }

    /// Append a loading placeholder, scrolled into view like any entry.
    pub fn push_loading(&mut self) -> MessageId {
        let id = self.transcript.append_loading();
        self.scroll_offset = 0;
        id
    }

    /// Remove a transcript entry by handle. Returns whether it was present.
    pub fn remove_message(&mut self, id: MessageId) -> bool {
        self.transcript.remove(id)
    }

    /// Flip panel visibility.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Advance the loading animation. Only moves while a send is pending.
    pub fn tick(&mut self) {
        if self.in_flight > 0 {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Submit the current input buffer. Returns the trimmed text if
    /// non-empty; whitespace-only input is left untouched.
    pub fn submit_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.input.clear();
        self.cursor_pos = 0;
        Some(trimmed)
    }

    /// Clamp the cursor position to the valid character range of the input.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Current cursor byte index into the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    /// Total number of characters in the input buffer.
    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    /// Move cursor to start of input.
    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    /// Move cursor to end of input.
    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}
