//! Fixed prompt templates and generation parameters for each route.
//!
//! Callers never choose temperature or token limits; every route pins its own.

use crate::llm::{ChatTurn, CompletionRequest};

pub const SEARCH_SYSTEM_PROMPT: &str = "You are a research search engine. Given a query, \
return ONLY a JSON array of 5 relevant results. Each result must be an object with the keys \
\"title\", \"source\" and \"snippet\". Do not include any text outside the JSON array.";

pub const EXTRACT_SYSTEM_PROMPT: &str = "You are an expert at structuring information. \
Produce a clear, hierarchical outline of the main points in the text you are given. \
Use nested bullet points and keep each point short.";

pub const INSIGHT_SYSTEM_PROMPT: &str = "You are an analytical research assistant. \
Read the text you are given and provide concise, non-obvious insights: key themes, \
implications and open questions worth investigating.";

pub const FORM_SYSTEM_PROMPT: &str = "You fill in forms using only the information in a \
source text. You always answer with a single JSON object and nothing else.";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful research assistant. Answer clearly \
and concisely, and say so when you are unsure.";

/// Sampling parameters pinned per route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generation {
    pub temperature: f32,
    pub max_tokens: u32,
}

pub const SEARCH: Generation = Generation {
    temperature: 0.5,
    max_tokens: 1000,
};

pub const EXTRACT: Generation = Generation {
    temperature: 0.3,
    max_tokens: 1000,
};

pub const INSIGHT: Generation = Generation {
    temperature: 0.7,
    max_tokens: 500,
};

pub const POPULATE_FORM: Generation = Generation {
    temperature: 0.2,
    max_tokens: 1500,
};

pub const CHAT: Generation = Generation {
    temperature: 0.7,
    max_tokens: 1000,
};

impl Generation {
    fn request(self, messages: Vec<ChatTurn>) -> CompletionRequest {
        CompletionRequest {
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

pub fn search(query: &str) -> CompletionRequest {
    SEARCH.request(vec![
        ChatTurn::system(SEARCH_SYSTEM_PROMPT),
        ChatTurn::user(format!("Search query: {}", query)),
    ])
}

pub fn extract(text: &str) -> CompletionRequest {
    EXTRACT.request(vec![
        ChatTurn::system(EXTRACT_SYSTEM_PROMPT),
        ChatTurn::user(format!("Create an outline of the following text:\n\n{}", text)),
    ])
}

pub fn insight(text: &str) -> CompletionRequest {
    INSIGHT.request(vec![
        ChatTurn::system(INSIGHT_SYSTEM_PROMPT),
        ChatTurn::user(format!(
            "Provide insights on the following text:\n\n{}",
            text
        )),
    ])
}

pub fn populate_form(source_text: &str, questions: &[String]) -> CompletionRequest {
    POPULATE_FORM.request(vec![
        ChatTurn::system(FORM_SYSTEM_PROMPT),
        ChatTurn::user(form_instruction(source_text, questions)),
    ])
}

/// Prepends the assistant's system turn to the caller's history, order untouched.
pub fn chat(history: Vec<ChatTurn>) -> CompletionRequest {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatTurn::system(CHAT_SYSTEM_PROMPT));
    messages.extend(history);
    CHAT.request(messages)
}

fn form_instruction(source_text: &str, questions: &[String]) -> String {
    let numbered = questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Answer each of the following questions using only the source text below.\n\n\
         Questions:\n{numbered}\n\n\
         Source text:\n\"\"\"\n{source_text}\n\"\"\"\n\n\
         Respond with a JSON object whose keys are the questions exactly as written above \
         (without their numbers) and whose values are the answers as strings. \
         If the source text does not answer a question, use an empty string."
    )
}
