use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::traits::AnswerService;
use super::types::{Answer, ServiceError};
use crate::constants::{ASK_ENDPOINT, HEALTH_CHECK_TIMEOUT_SECS, HEALTH_ENDPOINT};

/// HTTP implementation of the answer service client.
///
/// Speaks the SchemesConnect question-answering protocol: a POST of
/// `{"question": ...}` to `/api/ask`, answered with `{"answer": ...,
/// "sources": [...]}`.
pub struct HttpAnswerService {
    client: Client,
    base_url: String,
}

impl HttpAnswerService {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL the client was configured with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str) -> Result<Answer, ServiceError> {
        let url = format!("{}{}", self.base_url, ASK_ENDPOINT);
        debug!("asking answer service at {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "question": question }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_ask_response(status, &body)
    }

    async fn health(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);

        // Short separate timeout so status checks stay snappy
        let health_client = match Client::builder()
            .timeout(std::time::Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .build()
        {
            Ok(c) => c,
            Err(_) => return false,
        };

        match health_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Decode one `/api/ask` reply from its status code and raw body.
///
/// Kept free of the transport so the protocol rules are testable on their
/// own: any non-2xx status is a failure regardless of body, and a 2xx body
/// must parse as the expected shape.
fn decode_ask_response(status: u16, body: &[u8]) -> Result<Answer, ServiceError> {
    if !(200..300).contains(&status) {
        return Err(ServiceError::Status { code: status });
    }

    let reply: AskResponse = serde_json::from_slice(body)
        .map_err(|e| ServiceError::InvalidPayload(e.to_string()))?;

    Ok(Answer {
        text: reply.answer,
        sources: reply.sources.unwrap_or_default(),
    })
}

// Wire structures for the answer service (FastAPI JSON format)

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: String,
    sources: Option<Vec<String>>,
}
