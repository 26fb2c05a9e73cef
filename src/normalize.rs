//! Shaping of free-text model replies into the JSON each route promises.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Longest raw-reply prefix echoed back when a reply cannot be parsed.
pub const RAW_PREFIX_CHARS: usize = 200;

const PLACEHOLDER_SOURCE: &str = "AI Model";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Value,
    pub title: String,
    pub source: String,
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct RawSearchResult {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    snippet: String,
}

/// Removes a markdown code fence around a reply, if there is one.
pub fn strip_code_fence(reply: &str) -> &str {
    let mut text = reply.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // drop the info string (e.g. `json`) along with the opening fence line
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Turns a search reply into results. Never fails: unusable replies become one placeholder.
pub fn normalize_search(query: &str, reply: Option<&str>) -> Vec<SearchResult> {
    let reply = match reply {
        Some(reply) if !reply.trim().is_empty() => reply,
        _ => {
            warn!("Empty model reply for search query: {}", query);
            return vec![SearchResult {
                id: Value::from(1),
                title: format!("No results for \"{}\"", query),
                source: PLACEHOLDER_SOURCE.to_string(),
                snippet: "The model returned an empty response.".to_string(),
            }];
        }
    };

    match serde_json::from_str::<Vec<RawSearchResult>>(strip_code_fence(reply)) {
        Ok(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| SearchResult {
                id: match item.id {
                    Some(id) if !id.is_null() => id,
                    _ => Value::from(i + 1),
                },
                title: item.title,
                source: item.source,
                snippet: item.snippet,
            })
            .collect(),
        Err(e) => {
            warn!("Could not parse search results for '{}': {}", query, e);
            vec![SearchResult {
                id: Value::from(1),
                title: format!("Unparsed results for \"{}\"", query),
                source: PLACEHOLDER_SOURCE.to_string(),
                snippet: format!(
                    "The model response could not be parsed as results. Raw response: {}",
                    truncate_chars(reply, RAW_PREFIX_CHARS)
                ),
            }]
        }
    }
}

/// Projects a form reply onto exactly the requested questions, in request order.
pub fn normalize_form(questions: &[String], reply: Option<&str>) -> Result<Map<String, Value>> {
    let reply = reply
        .filter(|reply| !reply.trim().is_empty())
        .ok_or(Error::EmptyCompletion)?;

    let answers: Map<String, Value> = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| Error::MalformedCompletion {
            reason: e.to_string(),
            details: truncate_chars(reply, RAW_PREFIX_CHARS).to_string(),
        })?;

    Ok(questions
        .iter()
        .map(|question| {
            let answer = match answers.get(question) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            (question.clone(), Value::String(answer))
        })
        .collect())
}

/// The reply text, unchanged, or an error when there is none.
pub fn require_reply(reply: Option<String>) -> Result<String> {
    reply
        .filter(|text| !text.is_empty())
        .ok_or(Error::EmptyCompletion)
}
