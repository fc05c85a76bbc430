use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_QUESTION: &str = "What is civil engineering?";
pub const DEFAULT_FOLLOW_UP_QUESTION: &str =
    "Can you explain more about the different branches of civil engineering?";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. The HTTP client's default (none) applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_question")]
    pub first_question: String,
    #[serde(default = "default_follow_up_question")]
    pub follow_up_question: String,
    #[serde(default = "default_follow_up_delay_ms")]
    pub follow_up_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl DemoConfig {
    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.follow_up_delay_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            first_question: default_question(),
            follow_up_question: default_follow_up_question(),
            follow_up_delay_ms: default_follow_up_delay_ms(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}

fn default_follow_up_question() -> String {
    DEFAULT_FOLLOW_UP_QUESTION.to_string()
}

fn default_follow_up_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}
