use super::mocks::MockLlmClient;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use llm_proxy::{
    config::{LlmConfig, ServerConfig},
    llm::OpenAiClient,
    server::{self, handlers::AppState},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub const ALL_ROUTES: [&str; 5] = [
    "/api/search",
    "/api/extract",
    "/api/insight",
    "/api/populate_form",
    "/api/chat",
];

/// Router wired to a mock completion client
pub fn create_test_app(mock: MockLlmClient) -> Router {
    server::router(AppState::new(Arc::new(mock)), &ServerConfig::default()).unwrap()
}

/// Router wired to the real client pointed at `base_url`
pub fn create_app_with_upstream(base_url: &str, api_key: Option<&str>) -> Router {
    let client = OpenAiClient::new(test_llm_config(base_url, api_key));
    server::router(AppState::new(Arc::new(client)), &ServerConfig::default()).unwrap()
}

pub fn test_llm_config(base_url: &str, api_key: Option<&str>) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(String::from),
        model: "gpt-3.5-turbo".to_string(),
    }
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends a request and decodes the JSON body (Null when the body is not JSON)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, json_request(uri, &body)).await
}

/// An OpenAI-style chat completion body whose first choice carries `content`
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000u32,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// A valid request body for each route
pub fn valid_body(uri: &str) -> Value {
    match uri {
        "/api/search" => json!({"query": "solid state batteries"}),
        "/api/extract" => json!({"textToExtract": "Rust is a systems language."}),
        "/api/insight" => json!({"textForInsight": "Sales doubled in Q3."}),
        "/api/populate_form" => json!({
            "sourceText": "Ada Lovelace was born in 1815.",
            "questions": ["Name", "Birth year"]
        }),
        "/api/chat" => json!({"messages": [{"role": "user", "content": "Hello"}]}),
        other => panic!("no sample body for {other}"),
    }
}
