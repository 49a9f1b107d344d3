use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn.
///
/// `Candidate` and `Interviewer` turns are spoken dialogue. `HiddenReflection`
/// turns are the interviewer's private assessment: they go to the model as
/// context but are never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Candidate,
    Interviewer,
    HiddenReflection,
}

impl Speaker {
    pub fn is_visible(self) -> bool {
        !matches!(self, Speaker::HiddenReflection)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Candidate => write!(f, "Candidate"),
            Speaker::Interviewer => write!(f, "Interviewer"),
            Speaker::HiddenReflection => write!(f, "Reflection"),
        }
    }
}

/// One role-tagged message in the conversation. Never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

impl Turn {
    pub fn new(role: Speaker, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn candidate(content: impl Into<String>) -> Self {
        Self::new(Speaker::Candidate, content)
    }

    pub fn interviewer(content: impl Into<String>) -> Self {
        Self::new(Speaker::Interviewer, content)
    }

    pub fn reflection(content: impl Into<String>) -> Self {
        Self::new(Speaker::HiddenReflection, content)
    }

    pub fn is_visible(&self) -> bool {
        self.role.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_serialization() {
        assert_eq!(
            serde_json::to_string(&Speaker::Candidate).unwrap(),
            "\"candidate\""
        );
        assert_eq!(
            serde_json::to_string(&Speaker::HiddenReflection).unwrap(),
            "\"hidden_reflection\""
        );
        let parsed: Speaker = serde_json::from_str("\"interviewer\"").unwrap();
        assert_eq!(parsed, Speaker::Interviewer);
    }

    #[test]
    fn test_visibility() {
        assert!(Turn::candidate("hi").is_visible());
        assert!(Turn::interviewer("hello").is_visible());
        assert!(!Turn::reflection("seems nervous").is_visible());
    }

    #[test]
    fn test_speaker_display() {
        assert_eq!(Speaker::Candidate.to_string(), "Candidate");
        assert_eq!(Speaker::Interviewer.to_string(), "Interviewer");
    }
}
