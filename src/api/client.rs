use super::types::*;
use crate::{Error, Result, config::ApiConfig, console::Console};
use async_trait::async_trait;
use reqwest::{
    Method, RequestBuilder, Response,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error};

const APPLICATION_JSON: &str = "application/json";

pub const HEALTH_PATH: &str = "/";
pub const CHAT_PATH: &str = "/api/chat";
pub const CLEAR_PATH: &str = "/api/clear";
pub const TOGGLE_CHUNKS_PATH: &str = "/api/toggle-chunks";
pub const GENERATE_QUESTIONS_PATH: &str = "/api/generate-questions";

/// The chatbot endpoints, one HTTP exchange per call.
///
/// Every method logs its own failure and yields `None` instead of an error.
#[async_trait]
pub trait ChatbotApi: Send + Sync {
    async fn chat(&self, question: &str, options: ChatOptions) -> Option<ChatResponse>;

    async fn clear_conversation(&self) -> Option<Value>;

    async fn toggle_chunks(&self, show_chunks: bool) -> Option<Value>;

    async fn health_check(&self) -> Option<Value>;

    async fn generate_questions(
        &self,
        course_outcome: &str,
        bloom_level: &str,
    ) -> Option<GeneratedQuestions>;
}

pub struct HttpChatbotClient {
    client: reqwest::Client,
    base_url: String,
    console: Console,
}

impl HttpChatbotClient {
    pub fn new(config: &ApiConfig, console: Console) -> Result<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            console,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every request declares JSON both ways; a body sets its own
    /// content type through `.json()`.
    fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, APPLICATION_JSON);

        match body {
            Some(body) => builder.json(body),
            None => builder.header(CONTENT_TYPE, APPLICATION_JSON),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path, body), path).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request::<()>(Method::GET, path, None), path).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        debug!("Sending request to {}", path);

        let response = builder.send().await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes)?;

        debug!("Received {} bytes from {}", bytes.len(), path);
        Ok(parsed)
    }

    async fn try_chat(&self, question: &str, options: ChatOptions) -> Result<ChatResponse> {
        let request = ChatRequest {
            question: question.to_string(),
            show_chunks: options.show_chunks,
        };
        let response: ChatResponse = self.post_json(CHAT_PATH, Some(&request)).await?;

        self.console.line(format!("API Response: {}", response.as_value()));
        if let Some(answer) = response.answer() {
            self.console.blank();
            self.console.line("Answer from AI:");
            self.console.line(answer);
        }
        let level = response.cognitive_level();
        let description = response.cognitive_description();
        if level.is_some() || description.is_some() {
            self.console.blank();
            self.console.line(format!(
                "Cognitive Level: {} - {}",
                level.as_deref().unwrap_or("unknown"),
                description.as_deref().unwrap_or("")
            ));
        }
        if let Some(sentiment) = response.sentiment() {
            self.console.line(format!("Sentiment: {sentiment}"));
        }

        let chunks = response.chunks();
        if options.print_chunks && !chunks.is_empty() {
            self.console.chunks(&chunks);
        }

        Ok(response)
    }

    async fn try_generate_questions(
        &self,
        course_outcome: &str,
        bloom_level: &str,
    ) -> Result<GeneratedQuestions> {
        let request = GenerateQuestionsRequest {
            course_outcome: course_outcome.to_string(),
            bloom_level: bloom_level.to_string(),
        };
        let generated: GeneratedQuestions = self
            .post_json(GENERATE_QUESTIONS_PATH, Some(&request))
            .await?;

        self.console.line("Objective Question:");
        self.console.line(&generated.questions.objective.question);
        for option in &generated.questions.objective.options {
            self.console.line(format!("  {option}"));
        }
        self.console.blank();
        self.console.line("Short Answer Question:");
        self.console.line(&generated.questions.subjective);

        Ok(generated)
    }

    async fn try_health_check(&self) -> Result<Value> {
        let data: Value = self.get_json(HEALTH_PATH).await?;
        self.console.line(format!("Health check: {data}"));
        Ok(data)
    }

    /// Posts to `path` and echoes the returned mapping under `label`.
    async fn try_post_echo<B>(&self, path: &str, body: Option<&B>, label: &str) -> Result<Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let data: Value = self.post_json(path, body).await?;
        self.console.line(format!("{label}: {data}"));
        Ok(data)
    }
}

#[async_trait]
impl ChatbotApi for HttpChatbotClient {
    async fn chat(&self, question: &str, options: ChatOptions) -> Option<ChatResponse> {
        self.try_chat(question, options)
            .await
            .inspect_err(|e| log_failure("Chat request failed", e))
            .ok()
    }

    async fn clear_conversation(&self) -> Option<Value> {
        self.try_post_echo::<()>(CLEAR_PATH, None, "Conversation cleared")
            .await
            .inspect_err(|e| log_failure("Clear conversation request failed", e))
            .ok()
    }

    async fn toggle_chunks(&self, show_chunks: bool) -> Option<Value> {
        let request = ToggleChunksRequest { show_chunks };
        self.try_post_echo(TOGGLE_CHUNKS_PATH, Some(&request), "Toggle chunks")
            .await
            .inspect_err(|e| log_failure("Toggle chunks request failed", e))
            .ok()
    }

    async fn health_check(&self) -> Option<Value> {
        self.try_health_check()
            .await
            .inspect_err(|e| log_failure("Health check failed", e))
            .ok()
    }

    async fn generate_questions(
        &self,
        course_outcome: &str,
        bloom_level: &str,
    ) -> Option<GeneratedQuestions> {
        self.try_generate_questions(course_outcome, bloom_level)
            .await
            .inspect_err(|e| log_failure("Generate questions request failed", e))
            .ok()
    }
}

fn log_failure(what: &str, e: &Error) {
    error!(status = ?e.status_code(), "{}: {}", what, e);
}

/// Turns a non-success response into [`Error::Status`], keeping the
/// server's `{"error": "..."}` message when it sent one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string));

    Err(Error::status(status.as_u16(), message))
}
