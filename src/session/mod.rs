/// Chat session module - Gateway

mod chat;
mod transcript;

pub use chat::{ChatSession, SubmitOutcome};
pub use transcript::{Speaker, Transcript, Turn};
