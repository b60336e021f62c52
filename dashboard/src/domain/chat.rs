//! Assistant chat with canned replies.

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Replies the assistant picks from.
pub const CANNED_REPLIES: [&str; 5] = [
    "I understand your question, please wait a moment.",
    "Here is the information you asked for.",
    "Is there anything else I can help you with?",
    "I will help you find the information you need.",
    "Sorry, I did not understand the question. Please try again.",
];

/// Greeting shown above an empty transcript.
pub const CHAT_GREETING: &str = "INBOUND Assistant: start a conversation to ask about the system.";

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAuthor {
    /// The signed-in user.
    User,
    /// The canned-reply assistant.
    Assistant,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Who wrote it.
    pub author: ChatAuthor,
    /// Message text.
    pub text: String,
}

/// Picks assistant replies uniformly at random.
#[derive(Debug)]
pub struct ChatAssistant {
    rng: Mutex<SmallRng>,
}

impl ChatAssistant {
    /// Assistant seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Deterministic assistant for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Reply to a user message. The content of the message is not inspected.
    #[must_use]
    pub fn reply(&self, _message: &str) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        CANNED_REPLIES
            .choose(&mut *rng)
            .copied()
            .unwrap_or(CANNED_REPLIES[0])
    }
}

impl Default for ChatAssistant {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages exchanged in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Messages in the order they were sent.
    #[must_use]
    pub const fn messages(&self) -> &[ChatMessage] {
        self.messages.as_slice()
    }

    /// Append the user's message and the assistant's reply.
    ///
    /// Blank messages are ignored; returns whether anything was appended.
    pub fn submit(&mut self, message: &str, assistant: &ChatAssistant) -> bool {
        let text = message.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            author: ChatAuthor::User,
            text: text.to_owned(),
        });
        self.messages.push(ChatMessage {
            author: ChatAuthor::Assistant,
            text: assistant.reply(text).to_owned(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   \n")]
    fn blank_messages_are_ignored(#[case] message: &str) {
        let mut transcript = ChatTranscript::default();
        assert!(!transcript.submit(message, &ChatAssistant::seeded(1)));
        assert!(transcript.messages().is_empty());
    }

    #[rstest]
    fn submit_appends_message_and_canned_reply() {
        let mut transcript = ChatTranscript::default();
        assert!(transcript.submit("  where is TFOR 12? ", &ChatAssistant::seeded(7)));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, ChatAuthor::User);
        assert_eq!(messages[0].text, "where is TFOR 12?");
        assert_eq!(messages[1].author, ChatAuthor::Assistant);
        assert!(CANNED_REPLIES.contains(&messages[1].text.as_str()));
    }

    #[rstest]
    fn seeded_assistants_repeat_their_choices() {
        let first = ChatAssistant::seeded(42);
        let second = ChatAssistant::seeded(42);
        let a: Vec<_> = (0..10).map(|_| first.reply("hi")).collect();
        let b: Vec<_> = (0..10).map(|_| second.reply("hi")).collect();
        assert_eq!(a, b);
    }
}
