use super::types::*;
use crate::{
    Error, Result,
    llm::LlmClient,
    normalize::{normalize_form, normalize_search, require_reply},
    prompts,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

type Payload<T> = std::result::Result<Json<T>, JsonRejection>;

fn body<T>(payload: Payload<T>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(Error::from)
}

/// The value of a required text field, or a 400 naming the field.
fn required_text(value: Option<String>, message: &str) -> Result<String> {
    value
        .filter(|text| !text.is_empty())
        .ok_or_else(|| Error::invalid_input(message))
}

fn required_list<T>(value: Option<Vec<T>>, message: &str) -> Result<Vec<T>> {
    value
        .filter(|items| !items.is_empty())
        .ok_or_else(|| Error::invalid_input(message))
}

pub async fn index() -> &'static str {
    "LLM proxy backend is running"
}

pub async fn search(
    State(state): State<AppState>,
    payload: Payload<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let query = required_text(body(payload)?.query, "Query is required")?;
    info!("Received search request for query: {}", query);

    let completion = state
        .llm
        .create_chat_completion(prompts::search(&query))
        .await?;

    let results = normalize_search(&query, completion.content.as_deref());
    info!("Returning {} search results", results.len());

    Ok(Json(SearchResponse { results }))
}

pub async fn extract(
    State(state): State<AppState>,
    payload: Payload<ExtractRequest>,
) -> Result<Json<ExtractResponse>> {
    let text = required_text(body(payload)?.text_to_extract, "Text to extract is required")?;
    info!("Received extract request");
    debug!("Extract source length: {} chars", text.chars().count());

    let completion = state
        .llm
        .create_chat_completion(prompts::extract(&text))
        .await?;

    Ok(Json(ExtractResponse {
        outline: require_reply(completion.content)?,
    }))
}

pub async fn insight(
    State(state): State<AppState>,
    payload: Payload<InsightRequest>,
) -> Result<Json<InsightResponse>> {
    let text = required_text(
        body(payload)?.text_for_insight,
        "Text for insight is required",
    )?;
    info!("Received insight request");
    debug!("Insight source length: {} chars", text.chars().count());

    let completion = state
        .llm
        .create_chat_completion(prompts::insight(&text))
        .await?;

    Ok(Json(InsightResponse {
        insight: require_reply(completion.content)?,
    }))
}

pub async fn populate_form(
    State(state): State<AppState>,
    payload: Payload<PopulateFormRequest>,
) -> Result<Json<PopulateFormResponse>> {
    let request = body(payload)?;
    let source_text = required_text(request.source_text, "Source text is required")?;
    let questions = required_list(request.questions, "A non-empty list of questions is required")?;
    info!("Received form population request with {} questions", questions.len());

    let completion = state
        .llm
        .create_chat_completion(prompts::populate_form(&source_text, &questions))
        .await?;

    let populated_fields = normalize_form(&questions, completion.content.as_deref())?;

    Ok(Json(PopulateFormResponse { populated_fields }))
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Payload<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let messages = required_list(body(payload)?.messages, "Messages are required")?;
    info!("Received chat request with {} messages", messages.len());

    let completion = state
        .llm
        .create_chat_completion(prompts::chat(messages))
        .await?;

    Ok(Json(ChatResponse {
        reply: require_reply(completion.content)?,
    }))
}
