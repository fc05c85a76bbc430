use anyhow::Result;
use chatbot_probe::{
    api::{ChatOptions, ChatbotApi, HttpChatbotClient},
    config::{self, DEFAULT_QUESTION},
    console::Console,
    demo,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "chatbot-probe", version, about = "Smoke-test the chatbot HTTP API")]
struct Cli {
    /// Server address, overrides the configuration file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// GET / and print the health status.
    Health,
    /// Ask a question.
    Chat {
        #[arg(default_value = DEFAULT_QUESTION)]
        question: String,
        /// Override the server's chunk setting for this question only.
        #[arg(long)]
        show_chunks: Option<bool>,
        /// Print previews of the returned source chunks.
        #[arg(long)]
        print_chunks: bool,
    },
    /// Clear the server-side conversation history.
    Clear,
    /// Turn source chunks in chat answers on or off.
    ToggleChunks {
        #[arg(action = clap::ArgAction::Set)]
        show_chunks: bool,
    },
    /// Clear, enable chunks, then ask a question and a follow-up.
    Demo {
        /// Delay before the follow-up question, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Generate an objective and a short-answer question.
    GenerateQuestions {
        #[arg(long)]
        course_outcome: String,
        #[arg(long)]
        bloom_level: String,
    },
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn dispatch(api: &dyn ChatbotApi, command: Command, demo_config: config::DemoConfig) -> bool {
    match command {
        Command::Health => api.health_check().await.is_some(),
        Command::Chat {
            question,
            show_chunks,
            print_chunks,
        } => {
            let options = ChatOptions {
                show_chunks,
                print_chunks,
            };
            api.chat(&question, options).await.is_some()
        }
        Command::Clear => api.clear_conversation().await.is_some(),
        Command::ToggleChunks { show_chunks } => api.toggle_chunks(show_chunks).await.is_some(),
        Command::Demo { delay_ms } => {
            let mut demo_config = demo_config;
            if let Some(delay_ms) = delay_ms {
                demo_config.follow_up_delay_ms = delay_ms;
            }
            demo::run_conversation_demo(api, &demo_config).await.is_some()
        }
        Command::GenerateQuestions {
            course_outcome,
            bloom_level,
        } => api
            .generate_questions(&course_outcome, &bloom_level)
            .await
            .is_some(),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let mut config = match config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    init_tracing(&log_level, config.logs.json)?;

    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    info!("Probing chatbot API at {}", config.api.base_url);
    debug!("Running command: {:?}", cli.command);

    let client = HttpChatbotClient::new(&config.api, Console::stdout())?;

    if dispatch(&client, cli.command, config.demo).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
