//! Gemini `generateContent` client
//!
//! One POST per prompt. The request carries the system instruction, the whole session
//! history plus the new prompt, and the sampling settings. The reply is decoded through
//! the schema types below before anything reads it.
//!
//! The API key travels in the `x-goog-api-key` header, so it never shows up in a URL and
//! therefore never in a transport error message.

use crate::error::GenAiError;
use crate::generator::{GeneratedText, TextGenerator};
use crate::prompts::SYSTEM_INSTRUCTION;
use crate::session::{ChatSession, Content, Part, USER_ROLE};
use crate::sources::extract_sources;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const FALLBACK_TEXT: &str = "I'm sorry, I couldn't generate a response.";

/// Endpoint and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            temperature: 0.7,
            top_p: 0.95,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [InstructionPart<'a>; 1],
}

#[derive(Serialize)]
struct InstructionPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decode a success body, falling back to the fixed text when the model said nothing.
pub(crate) fn decode_reply(body: &str) -> Result<String, GenAiError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GenAiError::Schema(e.to_string()))?;
    let text = response.text();
    if text.trim().is_empty() {
        Ok(FALLBACK_TEXT.to_string())
    } else {
        Ok(text)
    }
}

/// Gemini REST client.
///
/// Not `Debug`: the struct holds the API key.
pub struct GeminiClient {
    http: reqwest::Client,
    settings: ClientSettings,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, settings: ClientSettings) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Read the API key from the environment variable `var`.
    pub fn from_env(var: &str, settings: ClientSettings) -> Result<Self, GenAiError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::new(SecretString::from(key), settings),
            _ => Err(GenAiError::MissingApiKey(var.to_string())),
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// A fresh session carrying the assistant's system instruction.
    pub fn create_session(&self) -> ChatSession {
        ChatSession::new(SYSTEM_INSTRUCTION)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn request_body<'a>(&self, session: &'a ChatSession, prompt: &str) -> GenerateRequest<'a> {
        let mut contents = session.history().to_vec();
        contents.push(Content {
            role: USER_ROLE.to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        });
        GenerateRequest {
            system_instruction: SystemInstruction {
                parts: [InstructionPart {
                    text: session.system_instruction(),
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                top_p: self.settings.top_p,
            },
        }
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        session: &mut ChatSession,
        prompt: &str,
    ) -> Result<GeneratedText, GenAiError> {
        let url = self.endpoint();
        debug!(
            model = %self.settings.model,
            history = session.len(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&self.request_body(session, prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenAiError::from_status(status.as_u16(), body));
        }

        let text = decode_reply(&body)?;
        let sources = extract_sources(&text);
        session.push_exchange(prompt, text.clone());
        info!(
            session = %session.id(),
            chars = text.len(),
            sources = sources.as_ref().map_or(0, Vec::len),
            "received model reply"
        );

        Ok(GeneratedText { text, sources })
    }
}
