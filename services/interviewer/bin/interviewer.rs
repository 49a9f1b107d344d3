//! Main Entrypoint for the Interviewer
//!
//! This binary is responsible for:
//! 1. Parsing arguments and loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the model client and the interview session.
//! 4. Running either the interactive console interview or the function-mode demo.
//! 5. Saving the transcript when asked to.

use anyhow::Context;
use clap::Parser;
use interviewer_core::{
    InterviewError, Interviewer,
    llm_client::{LLMClient, OpenAICompatibleClient},
    prompts::FUNCTION_MODE_SCRIPT,
};
use interviewer_service::{
    cli::Cli,
    config::Config,
    prompts::load_prompts,
    transcript::{load_transcript, save_transcript},
};
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let config = Config::from_env()
        .map_err(InterviewError::from)
        .context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        "Configuration loaded. Preparing the interview..."
    );

    // --- 3. Build the Session ---
    let prompts = load_prompts(config.prompts_path.as_deref())?;
    let mut settings = config.gateway_settings();
    settings.verbose_logging |= cli.verbose;
    let llm_client: Arc<dyn LLMClient> = Arc::new(OpenAICompatibleClient::from_settings(settings)?);

    let mut interviewer = match &cli.resume {
        Some(path) => {
            let store = load_transcript(path)?;
            info!(path = %path.display(), turns = store.len(), "Resuming interview");
            Interviewer::with_history(llm_client, prompts, store)?
        }
        None => Interviewer::new(llm_client, prompts),
    };

    // --- 4. Run the Interview ---
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Welcome to the Product Management Interview!\n")
        .await?;

    let outcome = if cli.test_function_mode {
        stdout.write_all(b"=== TESTING FUNCTION MODE ===\n").await?;
        interviewer.run_scripted(FUNCTION_MODE_SCRIPT, stdout).await
    } else {
        let stdin = BufReader::new(tokio::io::stdin());
        interviewer
            .run_interactive(cli.opening_message().as_deref(), stdin, stdout)
            .await
    };

    if let Err(e) = &outcome {
        error!(error = %e, "Interview ended with an error");
    }
    info!(
        visible_turns = interviewer.store().visible_snapshot().len(),
        total_turns = interviewer.store().len(),
        "Interview finished"
    );

    // --- 5. Save the Transcript ---
    if let Some(path) = &cli.transcript {
        save_transcript(path, interviewer.store())?;
        info!(path = %path.display(), "Transcript saved");
    }

    outcome?;
    Ok(())
}
