use std::sync::Arc;

use tracing::debug;

use super::transcript::{Transcript, Turn};
use crate::service::{Answer, AnswerService, ServiceError};

/// What a call to [`ChatSession::submit`] did.
///
/// Returned instead of relying on the caller observing mutated state, so a
/// presentation layer can re-render (and run its own side effects such as
/// scrolling) off an explicit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was rejected without effect: empty draft or a request
    /// already in flight. Policy, not an error.
    Ignored,
    /// The service answered; an assistant turn with the answer was appended
    Answered,
    /// The request failed; an assistant turn describing the failure was
    /// appended and the session remains usable
    Failed,
}

/// Manages the question/answer exchange loop for one conversation.
///
/// Owns the transcript, the not-yet-submitted draft, and the busy flag
/// that serializes requests: at most one request is in flight per session,
/// and submissions made while one is outstanding are silently dropped.
/// The session holds no UI concerns and performs no retries, cancellation,
/// or timeouts of its own.
pub struct ChatSession {
    service: Arc<dyn AnswerService>,
    transcript: Transcript,
    pending_input: String,
    awaiting_response: bool,
}

impl ChatSession {
    /// Create an empty session backed by the given answer service
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
            pending_input: String::new(),
            awaiting_response: false,
        }
    }

    /// Ordered conversation history
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current draft text
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// True while a request is outstanding
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// Store draft text for a later [`submit_draft`](Self::submit_draft)
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// True iff the draft has content and no request is in flight.
    ///
    /// Pure; presentation layers use this to gate their send affordance.
    pub fn can_submit(&self) -> bool {
        !self.pending_input.trim().is_empty() && !self.awaiting_response
    }

    /// Submit a question and wait for the reply.
    ///
    /// A blank question, or a call made while a request is outstanding, is
    /// ignored. Otherwise the trimmed text is appended as a user turn, the
    /// draft is cleared, and exactly one request goes to the answer
    /// service; its success or failure is appended as the matching
    /// assistant turn before this returns.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(question) = self.accept(text) else {
            return SubmitOutcome::Ignored;
        };

        let result = self.service.ask(&question).await;
        self.complete(result)
    }

    /// Submit whatever is in the draft box
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let draft = self.pending_input.clone();
        self.submit(&draft).await
    }

    /// Submit a preset quick question, bypassing the draft
    pub async fn select_suggested_question(&mut self, text: &str) -> SubmitOutcome {
        self.submit(text).await
    }

    /// Synchronous acceptance phase: validate, record the user turn, clear
    /// the draft, raise the busy flag. Returns the question to send, or
    /// None when the submission is ignored.
    fn accept(&mut self, text: &str) -> Option<String> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }
        if self.awaiting_response {
            debug!("submission ignored: request already in flight");
            return None;
        }

        self.transcript.push(Turn::user(question));
        self.pending_input.clear();
        self.awaiting_response = true;
        Some(question.to_string())
    }

    /// Synchronous completion phase: append the assistant turn for the
    /// request's outcome and clear the busy flag. Always clears the flag,
    /// on the failure path included.
    fn complete(&mut self, result: Result<Answer, ServiceError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(answer) => {
                self.transcript.push(Turn::assistant(answer.text, answer.sources));
                SubmitOutcome::Answered
            }
            Err(err) => {
                self.transcript
                    .push(Turn::assistant(format!("Error: {err}"), Vec::new()));
                SubmitOutcome::Failed
            }
        };
        self.awaiting_response = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockAnswerService;
    use crate::session::Speaker;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Scripted service that replays a fixed result for every question
    struct StubService {
        result: fn() -> Result<Answer, ServiceError>,
    }

    #[async_trait]
    impl AnswerService for StubService {
        async fn ask(&self, _question: &str) -> Result<Answer, ServiceError> {
            (self.result)()
        }
    }

    fn session_with(result: fn() -> Result<Answer, ServiceError>) -> ChatSession {
        ChatSession::new(Arc::new(StubService { result }))
    }

    #[tokio::test]
    async fn test_successful_exchange_with_sources() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "Try NSP.".to_string(),
                sources: vec!["NSP".to_string()],
            })
        });

        let outcome = session
            .submit("What schemes are available for students?")
            .await;

        assert_eq!(outcome, SubmitOutcome::Answered);
        assert!(!session.is_awaiting_response());

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "What schemes are available for students?");
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert_eq!(turns[1].text, "Try NSP.");
        assert_eq!(turns[1].citations, Some(vec!["NSP".to_string()]));
    }

    #[tokio::test]
    async fn test_answer_without_sources_has_no_citations() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "See PMJAY.".to_string(),
                sources: Vec::new(),
            })
        });

        session.submit("Eligibility for health insurance?").await;

        let turns = session.transcript().turns();
        assert_eq!(turns[1].citations, None);
    }

    #[tokio::test]
    async fn test_http_500_surfaces_status_in_error_turn() {
        let mut session = session_with(|| Err(ServiceError::Status { code: 500 }));

        let outcome = session
            .submit("What schemes are available for students?")
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!session.is_awaiting_response());

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].speaker, Speaker::Assistant);
        assert!(turns[1].text.contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_payload_surfaces_as_error_turn() {
        let mut session =
            session_with(|| Err(ServiceError::InvalidPayload("expected `answer`".to_string())));

        let outcome = session.submit("anything").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(session.transcript().last().unwrap().text.contains("expected `answer`"));
        assert!(!session.is_awaiting_response());
    }

    #[tokio::test]
    async fn test_session_stays_usable_after_failure() {
        let mut session = session_with(|| Err(ServiceError::Status { code: 502 }));

        session.submit("first").await;
        let outcome = session.submit("second").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(session.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_blank_submissions_are_ignored() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "unused".to_string(),
                sources: Vec::new(),
            })
        });

        assert_eq!(session.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(session.submit("   ").await, SubmitOutcome::Ignored);
        assert_eq!(session.submit("\n\t").await, SubmitOutcome::Ignored);

        assert!(session.transcript().is_empty());
        assert!(!session.is_awaiting_response());
    }

    #[tokio::test]
    async fn test_submitted_text_is_trimmed() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        session.submit("  How to apply for a pension?  ").await;

        assert_eq!(
            session.transcript().turns()[0].text,
            "How to apply for a pension?"
        );
    }

    #[tokio::test]
    async fn test_submission_while_awaiting_is_ignored() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        // Drive the phases by hand to observe the in-flight window
        let question = session.accept("first question").unwrap();
        assert!(session.is_awaiting_response());

        assert_eq!(session.submit("second question").await, SubmitOutcome::Ignored);
        assert_eq!(session.transcript().len(), 1);

        // The outstanding request still completes normally
        let outcome = session.complete(Ok(Answer {
            text: format!("answer to {question}"),
            sources: Vec::new(),
        }));
        assert_eq!(outcome, SubmitOutcome::Answered);
        assert_eq!(session.transcript().len(), 2);
        assert!(!session.is_awaiting_response());
    }

    #[tokio::test]
    async fn test_exactly_one_request_per_submission() {
        let mut mock = MockAnswerService::new();
        mock.expect_ask()
            .times(1)
            .returning(|_| {
                Ok(Answer {
                    text: "ok".to_string(),
                    sources: Vec::new(),
                })
            });

        let mut session = ChatSession::new(Arc::new(mock));
        session.submit("one question").await;
        session.submit("").await; // ignored, must not reach the service
    }

    #[tokio::test]
    async fn test_n_completed_turns_yield_2n_alternating_entries() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        for i in 0..5 {
            session.submit(&format!("question {i}")).await;
        }

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 10);
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Speaker::User
            } else {
                Speaker::Assistant
            };
            assert_eq!(turn.speaker, expected);
        }
    }

    #[tokio::test]
    async fn test_can_submit_truth_table() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        // Empty draft
        assert!(!session.can_submit());

        // Whitespace-only draft
        session.set_pending_input("   ");
        assert!(!session.can_submit());

        // Real draft
        session.set_pending_input("How to apply for a pension?");
        assert!(session.can_submit());

        // In flight: accepted submission clears the draft and raises the flag
        session.accept("How to apply for a pension?");
        assert!(!session.can_submit());

        // Resolved, new draft present
        session.complete(Err(ServiceError::Status { code: 500 }));
        session.set_pending_input("Subsidy schemes for farmers?");
        assert!(session.can_submit());
    }

    #[tokio::test]
    async fn test_accepted_submission_clears_draft() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        session.set_pending_input("Eligibility for health insurance?");
        let outcome = session.submit_draft().await;

        assert_eq!(outcome, SubmitOutcome::Answered);
        assert_eq!(session.pending_input(), "");
    }

    #[tokio::test]
    async fn test_draft_cleared_even_when_request_fails() {
        let mut session = session_with(|| Err(ServiceError::Status { code: 500 }));

        session.set_pending_input("a question");
        session.submit_draft().await;

        assert_eq!(session.pending_input(), "");
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_draft_untouched() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        session.accept("in flight");
        session.set_pending_input("typed while waiting");
        session.submit_draft().await;

        assert_eq!(session.pending_input(), "typed while waiting");
    }

    #[tokio::test]
    async fn test_suggested_question_bypasses_draft() {
        let mut session = session_with(|| {
            Ok(Answer {
                text: "ok".to_string(),
                sources: Vec::new(),
            })
        });

        session.set_pending_input("half-typed draft");
        let outcome = session
            .select_suggested_question("Subsidy schemes for farmers?")
            .await;

        assert_eq!(outcome, SubmitOutcome::Answered);
        assert_eq!(
            session.transcript().turns()[0].text,
            "Subsidy schemes for farmers?"
        );
        // Quick questions clear the draft like any accepted submission
        assert_eq!(session.pending_input(), "");
    }
}
