//! Interviewer Service Library Crate
//!
//! Everything the `interviewer` binary needs around the core: environment
//! configuration, command-line arguments, prompt overrides and transcript
//! files. The binary itself is a thin wrapper around this library.

pub mod cli;
pub mod config;
pub mod prompts;
pub mod transcript;
