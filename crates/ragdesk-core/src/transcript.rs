//! Chat transcript with per-message rendering cache.
//!
//! User messages are displayed verbatim. Assistant replies are passed through
//! the response formatter the first time they are displayed and the blocks are
//! kept on the message for as long as it lives.

use std::sync::OnceLock;

use chrono::{DateTime, Local};

use crate::client::ClientError;
use crate::format::{RenderedMessage, format_response};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// A single chat message.
#[derive(Debug)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    rendered: OnceLock<RenderedMessage>,
}

impl Message {
    fn new(id: String, text: String, sender: Sender) -> Self {
        Self {
            id,
            text,
            sender,
            timestamp: Local::now(),
            rendered: OnceLock::new(),
        }
    }

    /// Returns the formatted blocks for assistant messages.
    ///
    /// User messages return `None`; they are never formatted.
    pub fn blocks(&self) -> Option<&RenderedMessage> {
        match self.sender {
            Sender::User => None,
            Sender::Ai => Some(self.rendered.get_or_init(|| format_response(&self.text))),
        }
    }
}

/// Ordered list of messages exchanged in one chat session.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(text.into(), Sender::User)
    }

    pub fn push_ai(&mut self, text: impl Into<String>) -> &Message {
        self.push(text.into(), Sender::Ai)
    }

    /// Records the outcome of a question.
    ///
    /// Failures are replaced by the error's human fallback text, which then
    /// goes through the formatter like any other reply.
    pub fn push_ai_result(&mut self, result: Result<String, ClientError>) -> &Message {
        let text = match result {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, kind = %err.kind, "question failed");
                err.fallback_text().to_string()
            }
        };
        self.push_ai(text)
    }

    fn push(&mut self, text: String, sender: Sender) -> &Message {
        self.next_id += 1;
        let id = self.next_id.to_string();
        self.messages.push(Message::new(id, text, sender));
        let last = self.messages.len() - 1;
        &self.messages[last]
    }
}
