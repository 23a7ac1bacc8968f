//! Test doubles: a scripted generator and a one-shot HTTP server.

use scholar_genai::{ChatSession, GenAiError, GeneratedText, TextGenerator};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers from a queue and records every prompt it receives.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<GeneratedText, GenAiError>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<GeneratedText, GenAiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the prompts seen so far, usable after the generator is moved.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

pub fn reply(text: &str) -> Result<GeneratedText, GenAiError> {
    Ok(GeneratedText {
        text: text.to_string(),
        sources: scholar_genai::extract_sources(text),
    })
}

pub fn failure() -> Result<GeneratedText, GenAiError> {
    Err(GenAiError::Http {
        status: 503,
        message: "unavailable".to_string(),
    })
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        session: &mut ChatSession,
        prompt: &str,
    ) -> Result<GeneratedText, GenAiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| reply("unscripted"));
        if let Ok(generated) = &next {
            session.push_exchange(prompt, generated.text.clone());
        }
        next
    }
}

/// Serve exactly one request with a canned response.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        request
    });

    (base_url, handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
