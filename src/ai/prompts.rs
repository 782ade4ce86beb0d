//! Persona prompt and message builders for the support chat.

use super::ollama::Message;
use crate::constants::CHAT_HISTORY_LIMIT;

/// System prompt establishing the supportive listener persona.
pub const SYSTEM_PROMPT: &str = r#"You are Dr. Sarah, a warm, empathetic and experienced licensed therapist. Your role is to offer emotional support, active listening and gentle guidance to people who reach out.

How you respond:
- Respond with genuine empathy and warmth
- Use "I" statements and validate the person's feelings
- Ask thoughtful, open-ended questions that invite reflection
- Avoid direct advice; help them discover their own insights
- Keep a conversational, supportive tone, never clinical or cold
- Acknowledge the courage it takes to share
- Stay patient and non-judgmental
- Notice their strengths and resilience
- Keep replies concise but meaningful, usually 2-4 sentences

You are in a real conversation with someone who may be struggling. Be human, be present and be caring."#;

/// First assistant line shown when a chat starts.
pub const WELCOME_MESSAGE: &str = "Hello, I'm Dr. Sarah. I'm here to listen and support you in a safe, judgment-free space. What would you like to talk about today?";

/// Shown in place of a reply when the model cannot be reached.
pub const APOLOGY_MESSAGE: &str = "I'm experiencing some technical difficulties right now, but please know that I'm still here for you. Your feelings and what you're sharing matter deeply to me. Let's try again in just a moment.";

/// Rolling chat history: the persona prompt plus the most recent turns.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<Message>,
    limit: usize,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::with_limit(CHAT_HISTORY_LIMIT)
    }

    /// History keeping at most `limit` messages after the system prompt.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            messages: vec![Message::system(SYSTEM_PROMPT)],
            limit,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        let excess = self.messages.len().saturating_sub(self.limit + 1);
        if excess > 0 {
            self.messages.drain(1..=excess);
        }
    }

    /// Drops the most recent message unless it is the system prompt.
    pub fn pop(&mut self) -> Option<Message> {
        if self.messages.len() > 1 {
            self.messages.pop()
        } else {
            None
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
