//! Turn Store
//!
//! The single, append-only log of everything the model has seen in a session.
//! Visible history is a projection of this log rather than a second list.

use crate::error::{InterviewError, Result};
use crate::prompts::BOOTSTRAP_SEED;
use crate::turn::{Speaker, Turn};
use std::io::{self, BufRead, Write};

/// Ordered, append-only sequence of turns owned by one interview session.
///
/// `append` enforces the turn ordering of the interview protocol: a hidden
/// reflection must directly follow the candidate turn it assesses, and every
/// interviewer reply except the bootstrap greeting must directly follow a
/// reflection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStore {
    turns: Vec<Turn>,
}

impl TurnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn to the end of the log.
    pub fn append(&mut self, turn: Turn) -> Result<()> {
        check_follows(self.turns.last(), self.turns.len(), turn.role)?;
        self.turns.push(turn);
        Ok(())
    }

    /// Appends a batch of turns, either all of them or none.
    pub fn append_all(&mut self, turns: Vec<Turn>) -> Result<()> {
        let mut prev = self.turns.last();
        for (offset, turn) in turns.iter().enumerate() {
            check_follows(prev, self.turns.len() + offset, turn.role)?;
            prev = Some(turn);
        }
        self.turns.extend(turns);
        Ok(())
    }

    /// The full ordered log, hidden reflections included.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    /// Only the turns a human should see, in conversational order.
    pub fn visible_snapshot(&self) -> Vec<Turn> {
        self.turns
            .iter()
            .filter(|turn| turn.is_visible())
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Writes the log as JSON Lines, one turn per line, in order.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<()> {
        for turn in &self.turns {
            let line = serde_json::to_string(turn)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Rebuilds a store from JSON Lines written by [`TurnStore::write_jsonl`].
    ///
    /// Every line is replayed through `append`, so a transcript with turns out
    /// of order is rejected instead of producing an inconsistent session.
    pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let turn: Turn = serde_json::from_str(&line).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Malformed transcript line {}: {}", index + 1, e),
                )
            })?;
            store.append(turn)?;
        }
        Ok(store)
    }
}

fn check_follows(prev: Option<&Turn>, len: usize, next: Speaker) -> Result<()> {
    let prev_role = prev.map(|turn| turn.role);
    let allowed = match next {
        Speaker::Candidate => matches!(prev_role, None | Some(Speaker::Interviewer)),
        Speaker::HiddenReflection => prev_role == Some(Speaker::Candidate),
        Speaker::Interviewer => match prev_role {
            Some(Speaker::HiddenReflection) => true,
            // Only the bootstrap greeting, answering the seed, skips the reflection.
            Some(Speaker::Candidate) => {
                len == 1 && prev.is_some_and(|turn| turn.content == BOOTSTRAP_SEED)
            }
            _ => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        let after = prev_role
            .map(|role| role.to_string())
            .unwrap_or_else(|| "start of session".to_string());
        Err(InterviewError::ProtocolViolation(format!(
            "{} turn cannot follow {} (position {})",
            next, after, len
        )))
    }
}
