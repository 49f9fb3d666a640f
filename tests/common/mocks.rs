use async_trait::async_trait;
use food_classifier::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, LlmClient},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockReply {
    Completion(ChatCompletionResponse),
    Status(u16, Value),
    Failure(String),
}

/// Mock LLM client for testing
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub replies: Arc<Mutex<Vec<MockReply>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push(reply);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(MockReply::Completion(super::test_utils::completion_with_text(text)))
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        match replies.remove(0) {
            MockReply::Completion(response) => Ok(response),
            MockReply::Status(status, body) => Err(Error::UpstreamStatus { status, body }),
            MockReply::Failure(message) => Err(Error::llm(message)),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
