use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One conversation turn. Caller-supplied turns are forwarded as received:
/// role and content are not interpreted, and extra fields are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub model: String,
    /// Text of the first choice. `None` when the upstream returned no choices or no text.
    pub content: Option<String>,
}

impl ChatTurn {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Value::String(content.into()),
            extra: Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Content as plain text, when it is a string.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_chat_turn_deserializes_from_browser_shape() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"user","content":"What is Rust?"}"#).unwrap();
        assert_eq!(turn, ChatTurn::user("What is Rust?"));
        assert_eq!(turn.text(), Some("What is Rust?"));
    }

    #[test]
    fn test_any_role_and_content_shape_round_trips() {
        let raw = json!({
            "role": "developer",
            "content": [{"type": "text", "text": "hi"}],
            "name": "ops"
        });

        let turn: ChatTurn = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(turn.role, "developer");
        assert!(turn.text().is_none());
        assert_eq!(serde_json::to_value(&turn).unwrap(), raw);
    }

    #[test]
    fn test_turn_without_content_is_accepted() {
        let turn: ChatTurn = serde_json::from_value(json!({"role": "user"})).unwrap();

        assert!(turn.content.is_null());
        assert_eq!(serde_json::to_value(&turn).unwrap(), json!({"role": "user"}));
    }
}
