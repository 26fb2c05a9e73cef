use async_trait::async_trait;
use llm_proxy::{
    Error, Result,
    llm::{Completion, CompletionRequest, LlmClient},
};
use std::sync::{Arc, Mutex};

/// Outcome a mock call produces.
#[derive(Debug, Clone)]
pub enum MockReply {
    Content(String),
    Empty,
    Upstream { status: u16, message: String },
}

/// Mock LLM client that records every request it receives
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub replies: Arc<Mutex<Vec<MockReply>>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Content(content.into()));
        self
    }

    pub fn with_empty_reply(self) -> Self {
        self.replies.lock().unwrap().push(MockReply::Empty);
        self
    }

    pub fn with_upstream_error(self, status: u16, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push(MockReply::Upstream {
            status,
            message: message.into(),
        });
        self
    }

    pub fn get_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(&self, request: CompletionRequest) -> Result<Completion> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        match replies.remove(0) {
            MockReply::Content(content) => Ok(Completion {
                model: "mock-model".to_string(),
                content: Some(content),
            }),
            MockReply::Empty => Ok(Completion {
                model: "mock-model".to_string(),
                content: None,
            }),
            MockReply::Upstream { status, message } => Err(Error::upstream(status, message)),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
