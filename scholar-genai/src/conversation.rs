//! Conversation driver
//!
//! Owns the session and the visible turns of one research conversation. The first
//! free-text request of a session is rewritten into a retrieval prompt for that topic;
//! later requests are sent as typed. A failed request becomes a fixed error turn and the
//! conversation carries on.

use crate::generator::TextGenerator;
use crate::prompts::{quick_action, retrieval_prompt, Precision};
use crate::session::ChatSession;
use scholar_babel::{ChatTurn, ResearchMode, Transcript};
use tracing::{error, info};

pub const ERROR_TEXT: &str = "I encountered an error while accessing academic databases. Please check your connection and try again.";

pub struct Conversation<G> {
    generator: G,
    session: ChatSession,
    turns: Vec<ChatTurn>,
    topic: Option<String>,
    has_results: bool,
    precision: Precision,
}

impl<G: TextGenerator> Conversation<G> {
    pub fn new(generator: G, session: ChatSession) -> Self {
        Self {
            generator,
            session,
            turns: Vec::new(),
            topic: None,
            has_results: false,
            precision: Precision::default(),
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Whether any request of this session has succeeded.
    pub fn has_results(&self) -> bool {
        self.has_results
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Send free text. Blank input is ignored and yields `None`.
    ///
    /// Returns the model turn appended for this request, which is the error turn when
    /// the request failed.
    pub async fn ask(&mut self, text: &str) -> Option<&ChatTurn> {
        if text.trim().is_empty() {
            return None;
        }

        if self.has_results {
            return Some(self.send(text, text.to_string(), None).await);
        }

        self.topic = Some(text.to_string());
        let prompt = retrieval_prompt(text, self.precision);
        Some(self.send(text, prompt, Some(ResearchMode::Retrieve)).await)
    }

    /// Send the canned prompt of an analysis mode. `None` for `Retrieve`, which has no
    /// canned prompt.
    pub async fn run_action(&mut self, mode: ResearchMode) -> Option<&ChatTurn> {
        let action = quick_action(mode)?;
        Some(
            self.send(action.prompt, action.prompt.to_string(), Some(action.mode))
                .await,
        )
    }

    async fn send(
        &mut self,
        visible: &str,
        prompt: String,
        mode: Option<ResearchMode>,
    ) -> &ChatTurn {
        self.turns.push(ChatTurn::user(visible));

        let reply = match self.generator.generate(&mut self.session, &prompt).await {
            Ok(generated) => {
                self.has_results = true;
                info!(mode = ?mode, "model turn recorded");
                ChatTurn::model(generated.text, mode, generated.sources)
            }
            Err(err) => {
                error!("generation request failed: {err}");
                ChatTurn::model(ERROR_TEXT, None, None)
            }
        };

        self.turns.push(reply);
        &self.turns[self.turns.len() - 1]
    }

    /// Start over: new session, no turns, no topic, default precision.
    pub fn reset(&mut self) {
        let session = std::mem::replace(&mut self.session, ChatSession::new(""));
        self.session = session.reset();
        self.turns.clear();
        self.topic = None;
        self.has_results = false;
        self.precision = Precision::default();
        info!(session = %self.session.id(), "conversation reset");
    }

    /// Snapshot of the conversation for export.
    pub fn transcript(&self) -> Transcript {
        Transcript {
            topic: self.topic.clone(),
            turns: self.turns.clone(),
            selections: None,
        }
    }

    pub fn into_transcript(self) -> Transcript {
        Transcript {
            topic: self.topic,
            turns: self.turns,
            selections: None,
        }
    }
}
