use chatbot_probe::{
    api::{ChatResponse, HttpChatbotClient},
    config::{ApiConfig, DemoConfig},
    console::{Capture, Console},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::fs;

/// Nothing listens here, so every request fails to connect.
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

/// Create a client against `base_url` whose console output is captured
pub fn create_test_client(base_url: &str) -> (HttpChatbotClient, Capture) {
    let (console, capture) = Console::capture();
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
    };
    let client = HttpChatbotClient::new(&config, console).expect("Failed to build HTTP client");
    (client, capture)
}

/// Demo configuration without the pacing delay
pub fn create_fast_demo_config() -> DemoConfig {
    DemoConfig {
        follow_up_delay_ms: 0,
        ..DemoConfig::default()
    }
}

/// The chat answer used throughout the end-to-end tests
pub fn sample_chat_body() -> Value {
    json!({
        "answer": "Civil engineering is...",
        "cognitive_level": 2,
        "cognitive_description": "Comprehension",
        "sentiment": "neutral"
    })
}

/// A follow-up answer carrying two chunks longer than the preview limit
pub fn sample_follow_up_body() -> Value {
    json!({
        "answer": "The main branches are structural, geotechnical and transportation.",
        "cognitive_level": "understand",
        "cognitive_description": "Explain ideas or concepts",
        "sentiment": "curious",
        "chunks": ["A".repeat(200), "B".repeat(180)]
    })
}

pub fn chat_response(answer: &str) -> ChatResponse {
    ChatResponse::new(json!({ "answer": answer }))
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("chatbot-probe.yaml");
    fs::write(&config_path, content)
        .await
        .expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
api:
  base_url: "http://127.0.0.1:9000"
  timeout_secs: 10

demo:
  first_question: "What is a beam?"
  follow_up_question: "How are beams loaded?"
  follow_up_delay_ms: 250

logs:
  level: "debug"
  json: true
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
api:
  base_url: ["not", "a", "string"]
"#;
