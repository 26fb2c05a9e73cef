use crate::{llm::ChatTurn, normalize::SearchResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Request fields are optional so a missing field reaches the handler and gets
// a field-specific 400 rather than a generic body rejection.

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub text_to_extract: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    #[serde(default)]
    pub text_for_insight: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateFormRequest {
    #[serde(default)]
    pub source_text: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub outline: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PopulateFormResponse {
    /// Keyed by question, in the order the questions were asked.
    pub populated_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
