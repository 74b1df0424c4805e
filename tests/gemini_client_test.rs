//! Integration tests for the Gemini client with a mocked HTTP endpoint.

mod common;

use std::time::Duration;

use commitgen::generator::{FULL_SYSTEM_INSTRUCTION, SHORT_SYSTEM_INSTRUCTION};
use commitgen::{
    CompletionClient, CompletionError, GeminiClient, GeneratorConfig, GeneratorError,
    MessageGenerator, MessageStyle, RepositoryContext,
};
use common::gemini_response;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "test-model";
const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn config(server: &MockServer) -> GeneratorConfig {
    GeneratorConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL)
        .with_endpoint(server.uri())
}

#[tokio::test]
async fn test_complete_sends_instruction_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "rules"}]},
            "contents": [{"role": "user", "parts": [{"text": "Recent git log:\n"}]}],
            "generationConfig": {"thinkingConfig": {"includeThoughts": false, "thinkingBudget": 0}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response("feat: add x")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server)).unwrap();
    let text = client
        .complete("rules", "Recent git log:\n", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(text, "feat: add x");
}

#[tokio::test]
async fn test_api_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server)).unwrap();
    let err = client
        .complete("rules", "prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    match err {
        CompletionError::Api { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server)).unwrap();
    let err = client
        .complete("rules", "prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_response("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server)).unwrap();
    let err = client
        .complete("rules", "prompt", Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Timeout(d) if d == Duration::from_millis(100)));
}

#[tokio::test]
async fn test_generator_timeout_is_endpoint_call_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_response("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let generator = MessageGenerator::new(
        config(&server).with_timeout(Duration::from_millis(100)),
        MessageStyle::Full,
    )
    .unwrap();
    let context = RepositoryContext::from_supplied("+x", "");
    let err = generator.generate(&context).await.unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::EndpointCall(CompletionError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_generator_round_trip_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": SHORT_SYSTEM_INSTRUCTION}]},
            "contents": [{"parts": [{
                "text": "Recent git log:\nabc123 initial commit\n\nGit diff:\n+added line\n"
            }]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response("feat: add line")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = MessageGenerator::new(config(&server), MessageStyle::Short).unwrap();
    assert_ne!(generator.system_instruction(), FULL_SYSTEM_INSTRUCTION);

    let context = RepositoryContext::from_supplied("+added line", "abc123 initial commit");
    let message = generator.generate(&context).await.unwrap();
    assert_eq!(message, "feat: add line");
}
