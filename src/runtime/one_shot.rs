use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    cli::OutputFormat,
    service::AnswerService,
    session::{ChatSession, Speaker, SubmitOutcome},
};

/// Result of a one-shot question
#[derive(Debug, Serialize)]
pub struct AskResult {
    /// The question that was asked
    pub question: String,
    /// The assistant's reply (an error description when `ok` is false)
    pub answer: String,
    /// Citation labels, omitted when the service cited nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    /// Whether the service answered successfully
    pub ok: bool,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExecutionMetadata {
    /// Service the question was sent to
    pub service_url: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Runner for executing a single question outside the chat loop
pub struct OneShotRunner {
    session: ChatSession,
    service_url: String,
}

impl OneShotRunner {
    /// Create a runner with a fresh session against the given service
    pub fn new(service: Arc<dyn AnswerService>, service_url: String) -> Self {
        Self {
            session: ChatSession::new(service),
            service_url,
        }
    }

    /// Execute a single question and return the result
    pub async fn execute(&mut self, question: &str) -> Result<AskResult> {
        let start_time = std::time::Instant::now();

        let outcome = self.session.submit(question).await;
        if outcome == SubmitOutcome::Ignored {
            anyhow::bail!("Question is empty");
        }

        let turn = self
            .session
            .transcript()
            .last()
            .filter(|t| t.speaker == Speaker::Assistant)
            .context("session completed without an assistant turn")?;

        Ok(AskResult {
            question: question.trim().to_string(),
            answer: turn.text.clone(),
            sources: turn.citations.clone(),
            ok: outcome == SubmitOutcome::Answered,
            metadata: ExecutionMetadata {
                service_url: self.service_url.clone(),
                duration_ms: start_time.elapsed().as_millis(),
            },
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &AskResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => {
                let mut output = String::new();
                output.push_str(&result.answer);

                if let Some(sources) = &result.sources {
                    output.push_str("\n\nSources: ");
                    output.push_str(&sources.join(", "));
                }

                output
            }
            OutputFormat::Markdown => {
                let mut output = String::new();

                output.push_str("## Answer\n\n");
                output.push_str(&result.answer);
                output.push_str("\n\n");

                if let Some(sources) = &result.sources {
                    output.push_str("## Sources\n\n");
                    for source in sources {
                        output.push_str(&format!("- {}\n", source));
                    }
                    output.push('\n');
                }

                output.push_str("---\n");
                output.push_str(&format!(
                    "*Service: {} | Duration: {}ms*\n",
                    result.metadata.service_url, result.metadata.duration_ms
                ));

                output
            }
        }
    }
}
