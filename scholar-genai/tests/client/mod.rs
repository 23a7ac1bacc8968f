use crate::support::serve_once;
use scholar_genai::{
    ChatSession, ClientSettings, GenAiError, GeminiClient, TextGenerator, FALLBACK_TEXT,
};
use secrecy::SecretString;

fn client(base_url: String) -> GeminiClient {
    let settings = ClientSettings {
        base_url,
        model: "test-model".to_string(),
        ..ClientSettings::default()
    };
    GeminiClient::new(SecretString::from("test-key".to_string()), settings).unwrap()
}

#[tokio::test]
async fn test_successful_reply_extracts_sources() {
    let body = r#"{"candidates": [{"content": {"role": "model", "parts": [
        {"text": "Smith (2021) see https://doi.org/10.1/a and (https://doi.org/10.1/a)."}
    ]}}]}"#;
    let (base_url, server) = serve_once(200, body).await;
    let client = client(base_url);
    let mut session = client.create_session();

    let generated = client.generate(&mut session, "Summarize").await.unwrap();

    assert!(generated.text.starts_with("Smith (2021)"));
    assert_eq!(
        generated.sources,
        Some(vec!["https://doi.org/10.1/a".to_string()])
    );
    assert_eq!(session.len(), 1);

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert_eq!(
        request_line,
        "POST /v1beta/models/test-model:generateContent HTTP/1.1"
    );
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains("\"systemInstruction\""));
    assert!(request.contains("You are ScholarSync"));
    assert!(request.contains("\"text\":\"Summarize\""));
}

#[tokio::test]
async fn test_empty_candidates_use_fallback_text() {
    let (base_url, server) = serve_once(200, r#"{"candidates": []}"#).await;
    let client = client(base_url);
    let mut session = client.create_session();

    let generated = client.generate(&mut session, "Anything").await.unwrap();

    assert_eq!(generated.text, FALLBACK_TEXT);
    assert_eq!(generated.sources, None);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let (base_url, server) = serve_once(401, r#"{"error": {"message": "bad key"}}"#).await;
    let client = client(base_url);
    let mut session = ChatSession::new("sys");

    let err = client.generate(&mut session, "q").await.unwrap_err();

    match err {
        GenAiError::Auth { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("bad key"));
        }
        other => panic!("expected auth error, got {other:?}"),
    }
    assert!(session.is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited() {
    let (base_url, server) = serve_once(429, "{}").await;
    let client = client(base_url);
    let mut session = client.create_session();

    let err = client.generate(&mut session, "q").await.unwrap_err();

    assert!(matches!(err, GenAiError::RateLimited(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unexpected_payload_is_a_schema_error() {
    let (base_url, server) = serve_once(200, r#"{"candidates": {"text": "flat"}}"#).await;
    let client = client(base_url);
    let mut session = client.create_session();

    let err = client.generate(&mut session, "q").await.unwrap_err();

    assert!(matches!(err, GenAiError::Schema(_)));
    assert!(session.is_empty());
    server.await.unwrap();
}

#[test]
fn test_missing_api_key() {
    let result = GeminiClient::from_env(
        "SCHOLARSYNC_TEST_KEY_THAT_IS_NEVER_SET",
        ClientSettings::default(),
    );
    match result {
        Err(GenAiError::MissingApiKey(var)) => {
            assert_eq!(var, "SCHOLARSYNC_TEST_KEY_THAT_IS_NEVER_SET")
        }
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("expected a missing key error"),
    }
}
