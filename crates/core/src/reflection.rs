//! Hidden Reflection
//!
//! Before every visible reply the interviewer writes a short, candid note to an
//! imagined colleague about how the candidate is doing. The note is stored as a
//! hidden turn and becomes part of the context for the reply itself.

use crate::error::{InterviewError, Result};
use crate::llm_client::LLMClient;
use crate::turn::{Speaker, Turn};
use std::sync::Arc;
use tracing::debug;

/// Produces the interviewer's private assessment of the candidate so far.
pub struct ReflectionGenerator {
    llm_client: Arc<dyn LLMClient>,
    reflection_prompt: String,
}

impl ReflectionGenerator {
    pub fn new(llm_client: Arc<dyn LLMClient>, reflection_prompt: impl Into<String>) -> Self {
        Self {
            llm_client,
            reflection_prompt: reflection_prompt.into(),
        }
    }

    pub fn reflection_prompt(&self) -> &str {
        &self.reflection_prompt
    }

    /// Generates one reflection from the conversation as it stands.
    ///
    /// `context` must end with the candidate turn being assessed; the
    /// reflection and reply for that turn must not exist yet.
    pub async fn reflect(&self, context: &[Turn]) -> Result<String> {
        match context.last() {
            Some(turn) if turn.role == Speaker::Candidate => {}
            other => {
                return Err(InterviewError::ProtocolViolation(format!(
                    "Reflection requested after {} instead of a candidate turn",
                    other
                        .map(|turn| turn.role.to_string())
                        .unwrap_or_else(|| "an empty conversation".to_string())
                )));
            }
        }

        let raw = self
            .llm_client
            .generate(context, &self.reflection_prompt)
            .await?;
        let reflection = raw.trim();
        if reflection.is_empty() {
            return Err(InterviewError::Upstream(
                "Model returned an empty reflection".to_string(),
            ));
        }
        debug!(chars = reflection.len(), "Reflection generated");
        Ok(reflection.to_string())
    }

    /// Like [`ReflectionGenerator::reflect`], but already wrapped as a hidden turn.
    pub async fn reflect_turn(&self, context: &[Turn]) -> Result<Turn> {
        self.reflect(context).await.map(Turn::reflection)
    }
}
