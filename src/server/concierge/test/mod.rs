use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::{gemini::GeminiClient, Concierge};
use crate::server::{error::gemini::GeminiError, model::cafe::CafeInfo};


const MODEL: &str = "gemini-2.5-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn cafe() -> CafeInfo {
    CafeInfo {
        name: "SiipCoffee".to_string(),
        address: "Jl. Cafe No. 123, Jakarta".to_string(),
        phone: "+62 812-3456-7890".to_string(),
    }
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        reqwest::Client::new(),
        &server.uri(),
        MODEL,
        "test-key".to_string(),
    )
    .unwrap()
}

/// Gemini response body whose first candidate carries `text`.
fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

/// Mounts a successful generateContent response returning `text`.
async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(text)))
        .expect(1)
        .mount(server)
        .await;
}

/// Tests the request sent to the generateContent endpoint.
///
/// Verifies that the prompt and generation settings are posted to the model endpoint
/// with the API key as query parameter.
///
/// Expected: Ok with the candidate text
#[tokio::test]
async fn sends_prompt_with_generation_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [ { "parts": [ { "text": "Halo" } ] } ],
            "generationConfig": {
                "temperature": 0.6,
                "topK": 32,
                "topP": 0.9,
                "maxOutputTokens": 1024
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Hai!")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server).generate("Halo").await.unwrap();

    assert_eq!(text, "Hai!");
}

/// Tests a non-success status from the API.
///
/// Expected: Err(GeminiError::Api) carrying the status code
#[tokio::test]
async fn api_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let result = client(&server).generate("Halo").await;

    match result {
        Err(GeminiError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }
}

/// Tests a successful response without candidates.
///
/// Expected: Err(GeminiError::EmptyResponse)
#[tokio::test]
async fn missing_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let result = client(&server).generate("Halo").await;

    assert!(matches!(result, Err(GeminiError::EmptyResponse)));
}

/// Tests building a concierge with no remote client.
///
/// Expected: cafe info is exposed unchanged
#[test]
fn offline_concierge_keeps_cafe_info() {
    let concierge = Concierge::new(None, cafe());

    assert_eq!(concierge.cafe().name, "SiipCoffee");
}
