use async_trait::async_trait;
use chatbot_probe::api::{ChatOptions, ChatResponse, ChatbotApi, GeneratedQuestions};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One call made against [`MockChatbotApi`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Chat { question: String, options: ChatOptions },
    Clear,
    ToggleChunks(bool),
    Health,
    GenerateQuestions { course_outcome: String, bloom_level: String },
}

/// Mock chatbot API recording every call
#[derive(Debug, Default)]
pub struct MockChatbotApi {
    pub calls: Arc<Mutex<Vec<ApiCall>>>,
    pub chat_responses: Arc<Mutex<VecDeque<Option<ChatResponse>>>>,
    /// When set, clear and toggle calls are recorded but yield `None`.
    pub fail_setup: bool,
}

impl MockChatbotApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for successive chat calls; `None` simulates a failure.
    pub fn with_chat_responses(self, responses: Vec<Option<ChatResponse>>) -> Self {
        *self.chat_responses.lock().unwrap() = responses.into();
        self
    }

    pub fn with_failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    pub fn get_calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatbotApi for MockChatbotApi {
    async fn chat(&self, question: &str, options: ChatOptions) -> Option<ChatResponse> {
        self.record(ApiCall::Chat {
            question: question.to_string(),
            options,
        });
        self.chat_responses.lock().unwrap().pop_front().flatten()
    }

    async fn clear_conversation(&self) -> Option<Value> {
        self.record(ApiCall::Clear);
        if self.fail_setup {
            return None;
        }
        Some(json!({"message": "Conversation history cleared"}))
    }

    async fn toggle_chunks(&self, show_chunks: bool) -> Option<Value> {
        self.record(ApiCall::ToggleChunks(show_chunks));
        if self.fail_setup {
            return None;
        }
        Some(json!({"message": format!("Show chunks set to {show_chunks}"), "show_chunks": show_chunks}))
    }

    async fn health_check(&self) -> Option<Value> {
        self.record(ApiCall::Health);
        Some(json!({"status": "ok"}))
    }

    async fn generate_questions(
        &self,
        course_outcome: &str,
        bloom_level: &str,
    ) -> Option<GeneratedQuestions> {
        self.record(ApiCall::GenerateQuestions {
            course_outcome: course_outcome.to_string(),
            bloom_level: bloom_level.to_string(),
        });
        None
    }
}
