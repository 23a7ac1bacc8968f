//! The generation seam between the conversation driver and a model backend.

use crate::error::GenAiError;
use crate::session::ChatSession;
use std::future::Future;

/// Reply of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedText {
    pub text: String,
    /// URIs cited in `text`, first-appearance order. `None` when there are none.
    pub sources: Option<Vec<String>>,
}

/// Anything that can answer a prompt within a chat session.
///
/// Implementations append the exchange to the session history only when the request
/// succeeds.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        session: &mut ChatSession,
        prompt: &str,
    ) -> impl Future<Output = Result<GeneratedText, GenAiError>> + Send;
}
