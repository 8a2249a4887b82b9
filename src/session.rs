//! Chat session controller.
//!
//! Holds the conversation, the composer buffer and the awaiting-reply flag.
//! Submitting is split in two so a UI can paint the awaiting state while the
//! request is in flight: [`ChatSession::begin_submit`] appends the user
//! message and hands back the history to post, and
//! [`ChatSession::complete_exchange`] folds the outcome back in.
//! [`ChatSession::submit`] does both for headless callers.

use crate::types::{Message, Origin};
use crate::webhook::{ExchangeResult, Transport, exchange};

/// What the composer did with a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Submitted,
    NewlineInserted,
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    awaiting_reply: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Whether the send affordance should be enabled.
    pub fn can_send(&self) -> bool {
        !self.awaiting_reply && !self.input.trim().is_empty()
    }

    /// Appends a user message and returns the history to post.
    ///
    /// Blank text is a no-op. There is no guard against a second call while
    /// a reply is awaited; the UI disables sending instead.
    pub fn begin_submit(&mut self, text: &str) -> Option<Vec<Message>> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(Message::new(Origin::User, text, Vec::new()));
        self.input.clear();
        self.awaiting_reply = true;
        Some(self.messages.clone())
    }

    /// Submits the composer buffer.
    pub fn begin_submit_input(&mut self) -> Option<Vec<Message>> {
        let text = std::mem::take(&mut self.input);
        let pending = self.begin_submit(&text);
        if pending.is_none() {
            self.input = text;
        }
        pending
    }

    /// Enter submits the buffer. Shift+Enter leaves the buffer alone; the
    /// textarea inserts the line break at the caret and reports it through
    /// [`ChatSession::set_input`].
    pub fn press_enter(&mut self, shift: bool) -> (KeyOutcome, Option<Vec<Message>>) {
        if shift {
            return (KeyOutcome::NewlineInserted, None);
        }
        match self.begin_submit_input() {
            Some(history) => (KeyOutcome::Submitted, Some(history)),
            None => (KeyOutcome::Ignored, None),
        }
    }

    /// Folds an exchange outcome into the conversation.
    ///
    /// Failures are logged and swallowed; the awaiting flag is always
    /// cleared.
    pub fn complete_exchange(&mut self, outcome: ExchangeResult<Option<Message>>) {
        match outcome {
            Ok(Some(reply)) => {
                tracing::debug!(
                    id = %reply.id,
                    attachments = reply.attachments.len(),
                    "appending webhook reply"
                );
                self.messages.push(reply);
            }
            Ok(None) => {
                tracing::warn!("webhook reply carried no content");
            }
            Err(err) => {
                tracing::error!(error = %err, "error sending message to webhook");
            }
        }
        self.awaiting_reply = false;
    }

    /// Posts `history` and folds the outcome back in.
    pub async fn run_exchange<T>(&mut self, history: Vec<Message>, transport: &T)
    where
        T: Transport + ?Sized,
    {
        let outcome = exchange(transport, &history).await;
        self.complete_exchange(outcome);
    }

    pub async fn submit<T>(&mut self, text: &str, transport: &T)
    where
        T: Transport + ?Sized,
    {
        if let Some(history) = self.begin_submit(text) {
            self.run_exchange(history, transport).await;
        }
    }
}
