use thiserror::Error;

/// A successful reply from the answer service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The answer text
    pub text: String,
    /// Labels for the supporting material, empty when the service cited nothing
    pub sources: Vec<String>,
}

/// Failure modes of a single answer-service request.
///
/// Every variant is terminal for its request: callers surface the message
/// and may issue a fresh request afterwards.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("could not reach the answer service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("answer service returned status {code}")]
    Status { code: u16 },

    #[error("answer service returned an unreadable reply: {0}")]
    InvalidPayload(String),
}
