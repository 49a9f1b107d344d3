use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the interviewer.
#[derive(Parser, Debug)]
#[command(version, about = "A product management interviewer with a private opinion of you")]
pub struct Cli {
    /// Log the full context sent to the model on every call.
    #[arg(long)]
    pub verbose: bool,

    /// Replay a fixed list of candidate answers instead of reading from stdin.
    #[arg(long)]
    pub test_function_mode: bool,

    /// Write the full transcript, hidden reflections included, to this file on exit.
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Continue the interview stored in this transcript file.
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// The candidate's opening message.
    #[arg(trailing_var_arg = true)]
    pub opening: Vec<String>,
}

impl Cli {
    /// The opening words joined into one message, if any were given.
    pub fn opening_message(&self) -> Option<String> {
        if self.opening.is_empty() {
            None
        } else {
            Some(self.opening.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_message_joins_words() {
        let cli = Cli::try_parse_from(["interviewer", "Hello,", "I'm", "here"]).unwrap();
        assert_eq!(cli.opening_message().as_deref(), Some("Hello, I'm here"));
        assert!(!cli.test_function_mode);
    }

    #[test]
    fn test_no_opening_message() {
        let cli = Cli::try_parse_from(["interviewer"]).unwrap();
        assert_eq!(cli.opening_message(), None);
        assert!(cli.transcript.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "interviewer",
            "--test-function-mode",
            "--verbose",
            "--transcript",
            "out.jsonl",
            "--resume",
            "in.jsonl",
        ])
        .unwrap();
        assert!(cli.test_function_mode);
        assert!(cli.verbose);
        assert_eq!(cli.transcript, Some(PathBuf::from("out.jsonl")));
        assert_eq!(cli.resume, Some(PathBuf::from("in.jsonl")));
    }
}
