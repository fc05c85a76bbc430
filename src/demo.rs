use crate::{
    api::{ChatOptions, ChatResponse, ChatbotApi},
    config::{DEFAULT_QUESTION, DemoConfig},
};
use tracing::{info, warn};

/// Sends the fixed smoke-test question with default options.
pub async fn test_chat(api: &dyn ChatbotApi) -> Option<ChatResponse> {
    api.chat(DEFAULT_QUESTION, ChatOptions::default()).await
}

/// Walks through a short two-question conversation.
///
/// Clears the server-side history, turns chunk display on, asks the first
/// question and, once it has been answered, waits `follow_up_delay` before
/// asking the follow-up with chunk previews printed. Returns the follow-up
/// answer.
pub async fn run_conversation_demo(
    api: &dyn ChatbotApi,
    config: &DemoConfig,
) -> Option<ChatResponse> {
    info!("Running conversation demo...");

    api.clear_conversation().await;
    api.toggle_chunks(true).await;

    if api
        .chat(&config.first_question, ChatOptions::default())
        .await
        .is_none()
    {
        warn!("First question failed, skipping the follow-up");
        return None;
    }

    // Pacing between questions, not a completion signal.
    tokio::time::sleep(config.follow_up_delay()).await;

    api.chat(&config.follow_up_question, ChatOptions::with_chunk_previews())
        .await
}
