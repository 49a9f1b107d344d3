use crate::error::{InterviewError, Result};
use crate::turn::{Speaker, Turn};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const THOUGHTS_OPEN: &str = "[thoughts]";
const THOUGHTS_CLOSE: &str = "[/thoughts]";

/// Characters of each message shown by [`TracingObserver`].
const PREVIEW_CHARS: usize = 100;

/// A generic client for producing one reply from an LLM.
///
/// Implementations hold no conversation state: everything the model should
/// see is passed in on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Makes a single, non-streaming call and returns the reply text.
    async fn generate(&self, turns: &[Turn], system_prompt: &str) -> Result<String>;
}

/// Hook invoked around every outbound call, used for context logging.
pub trait GatewayObserver: Send + Sync {
    fn before_call(&self, system_prompt: &str, turns: &[Turn]);
    fn after_call(&self, outcome: std::result::Result<&str, &InterviewError>);
}

/// Logs the outbound context through `tracing`, truncating long messages.
pub struct TracingObserver;

impl GatewayObserver for TracingObserver {
    fn before_call(&self, system_prompt: &str, turns: &[Turn]) {
        info!(
            turns = turns.len(),
            system_prompt = %preview(system_prompt),
            "Context being sent to the model"
        );
        for turn in turns {
            let (role, content) = flatten_turn(turn);
            info!(role = role.as_str(), content = %preview(&content), "  message");
        }
    }

    fn after_call(&self, outcome: std::result::Result<&str, &InterviewError>) {
        match outcome {
            Ok(reply) => info!(reply = %preview(reply), "Model replied"),
            Err(e) => warn!(error = %e, "Model call failed"),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// The two roles the chat backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRole {
    User,
    Assistant,
}

impl BackendRole {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendRole::User => "user",
            BackendRole::Assistant => "assistant",
        }
    }
}

/// Maps a typed turn onto the backend's plain role vocabulary.
///
/// Reflections are text the assistant "said" to itself, so they go out as
/// assistant messages wrapped in a thoughts marker the system prompt can refer to.
pub fn flatten_turn(turn: &Turn) -> (BackendRole, String) {
    match turn.role {
        Speaker::Candidate => (BackendRole::User, turn.content.clone()),
        Speaker::Interviewer => (BackendRole::Assistant, turn.content.clone()),
        Speaker::HiddenReflection => (
            BackendRole::Assistant,
            format!("{}{}{}", THOUGHTS_OPEN, turn.content, THOUGHTS_CLOSE),
        ),
    }
}

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct GatewaySettings {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
    pub verbose_logging: bool,
}

/// An implementation of `LLMClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    timeout: Option<Duration>,
    observer: Option<Arc<dyn GatewayObserver>>,
}

impl OpenAICompatibleClient {
    /// Creates a client from settings.
    ///
    /// Fails with [`InterviewError::Configuration`] when no API key is present.
    /// With `verbose_logging` set, a [`TracingObserver`] is installed.
    pub fn from_settings(settings: GatewaySettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                InterviewError::Configuration("No API key available for the model".to_string())
            })?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.api_base);

        let observer: Option<Arc<dyn GatewayObserver>> = if settings.verbose_logging {
            Some(Arc::new(TracingObserver))
        } else {
            None
        };

        Ok(Self {
            client: Client::with_config(config),
            model: settings.model,
            max_tokens: settings.max_tokens,
            timeout: settings.timeout,
            observer,
        })
    }

    /// Replaces the observer called around each request.
    pub fn with_observer(mut self, observer: Arc<dyn GatewayObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn build_messages(
        system_prompt: &str,
        turns: &[Turn],
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(turns.len() + 1);
        if !system_prompt.is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()?
                    .into(),
            );
        }
        for turn in turns {
            let (role, content) = flatten_turn(turn);
            match role {
                BackendRole::User => messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(content)
                        .build()?
                        .into(),
                ),
                BackendRole::Assistant => messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content)
                        .build()?
                        .into(),
                ),
            }
        }
        Ok(messages)
    }

    async fn call(&self, turns: &[Turn], system_prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_completion_tokens(self.max_tokens)
            .messages(Self::build_messages(system_prompt, turns)?)
            .build()?;

        let chat = self.client.chat();
        let pending = chat.create(request);
        let response: CreateChatCompletionResponse = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                InterviewError::Upstream(format!("Model call timed out after {:?}", limit))
            })??,
            None => pending.await?,
        };

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| InterviewError::Upstream("LLM response had no text content".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn generate(&self, turns: &[Turn], system_prompt: &str) -> Result<String> {
        if let Some(observer) = &self.observer {
            observer.before_call(system_prompt, turns);
        }
        let outcome = self.call(turns, system_prompt).await;
        if let Some(observer) = &self.observer {
            observer.after_call(outcome.as_deref());
        }
        outcome
    }
}
