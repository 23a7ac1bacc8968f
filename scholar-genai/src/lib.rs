//! Research conversations backed by Gemini
//!
//!     prompts          system instruction, retrieval prompt, quick actions
//!     session          explicit chat session (history) value
//!     generator        TextGenerator seam and its reply type
//!     client           Gemini REST implementation of TextGenerator
//!     sources          cited URI extraction
//!     conversation     drives a session and records ChatTurns for export
//!
//! The conversation produces plain [`scholar_babel::ChatTurn`]s, so its transcript feeds
//! the report pipeline directly.

pub mod client;
pub mod conversation;
pub mod error;
pub mod generator;
pub mod prompts;
pub mod session;
pub mod sources;

pub use client::{ClientSettings, GeminiClient, FALLBACK_TEXT};
pub use conversation::{Conversation, ERROR_TEXT};
pub use error::GenAiError;
pub use generator::{GeneratedText, TextGenerator};
pub use prompts::{quick_action, retrieval_prompt, Precision, QuickAction, QUICK_ACTIONS};
pub use session::ChatSession;
pub use sources::extract_sources;
