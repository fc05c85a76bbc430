use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_chunks: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleChunksRequest {
    pub show_chunks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub course_outcome: String,
    pub bloom_level: String,
}

/// Answer to a chat question, held as the exact JSON the server sent.
///
/// Nothing is required of the body: accessors read whichever of `answer`,
/// `cognitive_level`, `cognitive_description`, `sentiment` and `chunks`
/// are present, and serializing gives back the received document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse(Value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestions {
    pub bloom_level: Option<String>,
    pub course_outcome: Option<String>,
    pub questions: QuestionSet,
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub objective: ObjectiveQuestion,
    pub subjective: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Per-call knobs for [`chat`](super::ChatbotApi::chat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Overrides the server-wide chunk setting for this request only.
    pub show_chunks: Option<bool>,
    /// Print previews of returned chunks under the answer.
    pub print_chunks: bool,
}

impl ChatOptions {
    pub fn with_chunk_previews() -> Self {
        Self {
            show_chunks: None,
            print_chunks: true,
        }
    }
}

impl ChatResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn answer(&self) -> Option<String> {
        self.label("answer")
    }

    /// Either a taxonomy key such as `"understand"` or a numeric level.
    pub fn cognitive_level(&self) -> Option<String> {
        self.label("cognitive_level")
    }

    pub fn cognitive_description(&self) -> Option<String> {
        self.label("cognitive_description")
    }

    pub fn sentiment(&self) -> Option<String> {
        self.label("sentiment")
    }

    /// Chunks returned with the answer; empty when the server sent none.
    pub fn chunks(&self) -> Vec<String> {
        match self.0.get("chunks") {
            Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
            _ => Vec::new(),
        }
    }

    fn label(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(text)
    }
}

/// Strings as-is, `null` as absent, anything else as compact JSON.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
