// ABOUTME: Transcript data model — an append-only ordered list of chat messages.
// ABOUTME: Loading placeholders are the one removable entry, addressed by handle.

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    /// Transient placeholder shown while a request is outstanding.
    Loading,
}

/// Handle to a transcript entry, returned by `append`.
///
/// Only used to remove a loading placeholder once its request settles;
/// regular messages are never touched again after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageId(u64);

/// A single message in the transcript. Immutable after creation.
#[derive(Debug)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

/// Ordered, append-only sequence of messages. Insertion order is display
/// order; the transcript lives for the session and is never persisted.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its handle.
    ///
    /// Text may be empty only for `Sender::Loading` — a loading entry
    /// renders an indeterminate indicator instead of text.
    pub fn append(&mut self, text: impl Into<String>, sender: Sender) -> MessageId {
        let text = text.into();
        debug_assert!(
            !text.is_empty() || sender == Sender::Loading,
            "only loading placeholders may have empty text"
        );
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.entries.push(Message { id, text, sender });
        id
    }

    /// Append a loading placeholder.
    pub fn append_loading(&mut self) -> MessageId {
        self.append(String::new(), Sender::Loading)
    }

    /// Remove the entry with the given handle. Returns whether it was
    /// still present.
    pub fn remove(&mut self, id: MessageId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
