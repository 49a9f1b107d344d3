//! Interview Orchestrator
//!
//! Drives one interview session. Each candidate utterance goes through the same
//! cycle: the candidate turn is staged, the interviewer privately reflects on
//! it, and only then produces a visible reply with its own reflection in
//! context. The staged turns are committed to the store together once the
//! reply exists, so a failed model call never leaves half a cycle behind.
//!
//! Two entry points share this cycle: [`Interviewer::respond_to`] for single
//! calls, and [`Interviewer::run_interactive`] which loops over lines of input
//! until the candidate types `exit`.

use crate::error::{InterviewError, Result};
use crate::llm_client::LLMClient;
use crate::prompts::{BOOTSTRAP_SEED, Prompts};
use crate::reflection::ReflectionGenerator;
use crate::store::TurnStore;
use crate::turn::{Speaker, Turn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Utterance that ends the interactive loop, compared case-insensitively.
pub const EXIT_SENTINEL: &str = "exit";

/// Returns true when the candidate asked to leave the interview.
///
/// Only the bare word counts; surrounding whitespace makes it an ordinary answer.
pub fn is_exit_sentinel(utterance: &str) -> bool {
    utterance.eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// Where the session is within the reflect-then-reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No turns yet.
    Uninitialized,
    /// The interviewer has spoken; waiting for the candidate.
    AwaitingCandidate,
    /// The candidate has spoken; the hidden reflection is being produced.
    Reflecting,
    /// The reflection exists; the visible reply is being produced.
    Responding,
}

/// One interview session: its turn log, its model client and its fixed prompts.
pub struct Interviewer {
    store: TurnStore,
    llm_client: Arc<dyn LLMClient>,
    reflection: ReflectionGenerator,
    system_prompt: String,
    phase: Phase,
}

impl Interviewer {
    /// Creates a fresh session with an empty turn log.
    pub fn new(llm_client: Arc<dyn LLMClient>, prompts: Prompts) -> Self {
        let reflection = ReflectionGenerator::new(llm_client.clone(), prompts.reflection_prompt);
        Self {
            store: TurnStore::new(),
            llm_client,
            reflection,
            system_prompt: prompts.system_prompt,
            phase: Phase::Uninitialized,
        }
    }

    /// Continues a session from an earlier turn log.
    ///
    /// The log must end on an interviewer reply (or be empty); a log that stops
    /// mid-cycle is rejected.
    pub fn with_history(
        llm_client: Arc<dyn LLMClient>,
        prompts: Prompts,
        store: TurnStore,
    ) -> Result<Self> {
        let phase = match store.last().map(|turn| turn.role) {
            None => Phase::Uninitialized,
            Some(Speaker::Interviewer) => Phase::AwaitingCandidate,
            Some(role) => {
                return Err(InterviewError::ProtocolViolation(format!(
                    "Transcript ends mid-cycle on a {} turn",
                    role
                )));
            }
        };
        let mut interviewer = Self::new(llm_client, prompts);
        interviewer.store = store;
        interviewer.phase = phase;
        Ok(interviewer)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &TurnStore {
        &self.store
    }

    /// Produces the interviewer's next visible line.
    ///
    /// With no utterance on an empty session the interviewer opens the
    /// interview from a greeting seed, without reflecting. Any utterance,
    /// including an empty string, runs the full reflect-then-reply cycle.
    /// On error the turn log is left exactly as it was.
    pub async fn respond_to(&mut self, utterance: Option<&str>) -> Result<String> {
        let previous = self.phase;
        let result = match utterance {
            None if self.store.is_empty() => self.bootstrap().await,
            None => Err(InterviewError::ProtocolViolation(
                "No candidate utterance supplied for an interview already in progress".to_string(),
            )),
            Some(text) => self.cycle(text).await,
        };
        if let Err(e) = &result {
            warn!(error = %e, phase = ?self.phase, "Interview cycle failed; no turns recorded");
            self.phase = previous;
        }
        result
    }

    async fn bootstrap(&mut self) -> Result<String> {
        self.transition(Phase::Responding);
        let mut staged = vec![Turn::candidate(BOOTSTRAP_SEED)];
        let reply = self
            .llm_client
            .generate(&staged, &self.system_prompt)
            .await?;
        staged.push(Turn::interviewer(reply.clone()));
        self.store.append_all(staged)?;
        self.transition(Phase::AwaitingCandidate);
        info!("Interview opened by the interviewer");
        Ok(reply)
    }

    async fn cycle(&mut self, utterance: &str) -> Result<String> {
        let committed = self.store.len();
        let mut context = self.store.snapshot().to_vec();
        context.push(Turn::candidate(utterance));

        self.transition(Phase::Reflecting);
        let reflection = self.reflection.reflect_turn(&context).await?;
        context.push(reflection);

        self.transition(Phase::Responding);
        let reply = self
            .llm_client
            .generate(&context, &self.system_prompt)
            .await?;
        context.push(Turn::interviewer(reply.clone()));

        self.store.append_all(context.split_off(committed))?;
        self.transition(Phase::AwaitingCandidate);
        info!(turns = self.store.len(), "Interview cycle complete");
        Ok(reply)
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "Phase transition");
        self.phase = next;
    }

    /// Runs the interview as a console conversation.
    ///
    /// An `initial` utterance is answered first; without one, an empty session
    /// is opened by the interviewer. Afterwards each line read from `input` is
    /// answered until the line is `exit` (any case) or input ends. The exit line
    /// is never stored or sent to the model. Upstream failures are reported and
    /// the candidate may answer again; other errors end the loop.
    pub async fn run_interactive<R, W>(
        &mut self,
        initial: Option<&str>,
        mut input: R,
        mut output: W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match initial {
            Some(text) if is_exit_sentinel(text) => return Ok(()),
            Some(text) => {
                write_line(&mut output, &format!("Candidate: {}", text)).await?;
                self.answer(Some(text), &mut output).await?;
            }
            None if self.store.is_empty() => self.answer(None, &mut output).await?,
            None => {}
        }

        let mut line = String::new();
        loop {
            output.write_all(b"Candidate: ").await?;
            output.flush().await?;

            line.clear();
            if input.read_line(&mut line).await? == 0 {
                info!("Input closed; leaving the interview");
                break;
            }
            let utterance = line.trim_end_matches(['\r', '\n']);
            if is_exit_sentinel(utterance) {
                info!("Candidate left the interview");
                break;
            }
            self.answer(Some(utterance), &mut output).await?;
        }
        Ok(())
    }

    /// Replays a fixed list of candidate answers through `respond_to`.
    ///
    /// Stops at the first `exit` entry. Every error is returned to the caller.
    pub async fn run_scripted<W>(&mut self, script: &[&str], mut output: W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for utterance in script {
            if is_exit_sentinel(utterance) {
                break;
            }
            write_line(&mut output, &format!("Candidate: {}", utterance)).await?;
            let reply = self.respond_to(Some(utterance)).await?;
            write_line(&mut output, &format!("Interviewer: {}", reply)).await?;
        }
        Ok(())
    }

    async fn answer<W>(&mut self, utterance: Option<&str>, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.respond_to(utterance).await {
            Ok(reply) => write_line(output, &format!("Interviewer: {}", reply)).await,
            Err(e) if e.is_retryable() => {
                write_line(
                    output,
                    &format!("[The interviewer could not respond ({}). Please try again.]", e),
                )
                .await
            }
            Err(e) => Err(e),
        }
    }
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
