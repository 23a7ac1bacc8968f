//! Explicit chat session state
//!
//! A session owns the running history sent with every request. It is a plain value: the
//! caller holds it, passes it to the generator by `&mut`, and replaces it on reset.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles as named on the wire.
pub const USER_ROLE: &str = "user";
pub const MODEL_ROLE: &str = "model";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One message of the history, in the generateContent wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    system_instruction: String,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Record a completed request/response pair.
    pub fn push_exchange(&mut self, prompt: impl Into<String>, reply: impl Into<String>) {
        self.history.push(Content::new(USER_ROLE, prompt));
        self.history.push(Content::new(MODEL_ROLE, reply));
    }

    /// Number of completed exchanges.
    pub fn len(&self) -> usize {
        self.history.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop this session and start a fresh one with the same instruction.
    pub fn reset(self) -> ChatSession {
        ChatSession::new(self.system_instruction)
    }
}
