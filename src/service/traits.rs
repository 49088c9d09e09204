use async_trait::async_trait;

use super::types::{Answer, ServiceError};

/// Core trait the chat session talks to.
///
/// The production implementation speaks HTTP; tests drive the session with
/// scripted stand-ins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask a single question and wait for the reply
    async fn ask(&self, question: &str) -> Result<Answer, ServiceError>;

    /// Check whether the service is reachable
    async fn health(&self) -> bool {
        true
    }
}
