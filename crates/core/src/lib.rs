//! Interviewer Core
//!
//! A product-management interviewer that keeps a hidden, candid assessment of
//! the candidate alongside the visible dialogue. The assessment is written
//! before every reply and fed back to the model as private context.

pub mod error;
pub mod interviewer;
pub mod llm_client;
pub mod prompts;
pub mod reflection;
pub mod store;
pub mod turn;

pub use error::InterviewError;
pub use interviewer::{Interviewer, Phase};
pub use store::TurnStore;
pub use turn::{Speaker, Turn};
