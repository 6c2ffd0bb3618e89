use serde_json::json;
use steelforge::generation::{normalize_generated, GeminiClient, GenerationError, SCHEMA_PREAMBLE};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/models/gemini-test:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url(Some("test-key".to_string()), MODEL, &server.uri())
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

#[tokio::test]
async fn generate_posts_prompt_and_parses_candidate_json() {
    let server = MockServer::start().await;
    let monster = json!({
        "name": "Lantern Goblin",
        "type": "Goblin",
        "level": 1,
        "role": "Minion Artillery",
        "ev": 3,
        "stats": {"size": "1S", "speed": 6, "stamina": 4, "stability": 0, "freeStrike": 1},
        "abilities": [{"name": "Flare", "type": "Action", "keywords": ["Ranged", "Fire"]}]
    });

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&monster.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server)
        .generate("a goblin carrying a lantern")
        .await
        .expect("generation should succeed");
    let (normalized, report) = normalize_generated(value).expect("object should normalize");

    assert!(!report.has_errors());
    assert_eq!(normalized.name, "Lantern Goblin");
    assert_eq!(normalized.stats.speed, "6");
    assert_eq!(normalized.abilities[0].keywords, vec!["Ranged", "Fire"]);

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("request body is json");
    let text = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(text.starts_with(SCHEMA_PREAMBLE));
    assert!(text.ends_with("User Description: a goblin carrying a lantern"));
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid." }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("anything").await.unwrap_err();
    match err {
        GenerationError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_candidate_is_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Here is your monster!")))
        .mount(&server)
        .await;

    let err = client(&server).generate("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Gemini returned invalid JSON"));
}

#[tokio::test]
async fn missing_candidates_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client(&server).generate("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = GeminiClient::with_base_url(Some("  ".to_string()), MODEL, &server.uri());

    let err = client.generate("anything").await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingApiKey));
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}
