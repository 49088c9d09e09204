use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    app::Config,
    service::AnswerService,
    session::{ChatSession, Speaker, SubmitOutcome, Turn},
};

/// Line-oriented chat loop on stdin/stdout.
///
/// Renders the transcript as it grows and forwards user intent into the
/// session; all conversation rules (busy gating, error turns, draft
/// handling) live in [`ChatSession`], not here.
pub struct InteractiveRunner {
    service: Arc<dyn AnswerService>,
    session: ChatSession,
    suggested_questions: Vec<String>,
    show_sources: bool,
    service_url: String,
}

impl InteractiveRunner {
    /// Create a runner with a fresh session against the given service
    pub fn new(service: Arc<dyn AnswerService>, service_url: String, config: &Config) -> Self {
        let session = ChatSession::new(Arc::clone(&service));
        Self {
            service,
            session,
            suggested_questions: config.assistant.suggested_questions.clone(),
            show_sources: config.assistant.show_sources,
            service_url,
        }
    }

    /// Run the chat loop until the user quits or stdin closes
    pub async fn run(mut self) -> Result<()> {
        self.print_banner();
        self.print_questions();

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all("you> ".cyan().bold().to_string().as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break; // stdin closed
            };
            let input = line.trim().to_string();

            match input.as_str() {
                "" => continue,
                "/quit" | "/exit" => break,
                "/help" => {
                    self.print_help();
                    continue;
                }
                "/questions" => {
                    self.print_questions();
                    continue;
                }
                "/new" => {
                    // Transcripts are append-only, so a reset is a new session
                    self.session = ChatSession::new(Arc::clone(&self.service));
                    println!("{}", "Started a new conversation.".yellow());
                    continue;
                }
                _ => {}
            }

            // A bare number picks the matching suggested question
            let outcome = if let Some(question) = self.pick_suggested(&input) {
                println!("{} {}", "asking:".dimmed(), question.bold());
                self.session.select_suggested_question(&question).await
            } else {
                self.session.set_pending_input(input);
                self.session.submit_draft().await
            };

            match outcome {
                SubmitOutcome::Answered | SubmitOutcome::Failed => {
                    if let Some(turn) = self.session.transcript().last() {
                        self.render_turn(turn);
                    }
                }
                SubmitOutcome::Ignored => {}
            }
        }

        println!("{}", "Goodbye!".yellow());
        Ok(())
    }

    /// Resolve "2" to the second suggested question
    fn pick_suggested(&self, input: &str) -> Option<String> {
        let index: usize = input.parse().ok()?;
        self.suggested_questions
            .get(index.checked_sub(1)?)
            .cloned()
    }

    fn render_turn(&self, turn: &Turn) {
        if turn.speaker != Speaker::Assistant {
            return;
        }

        println!("{} {}", "assistant>".blue().bold(), turn.text);

        if self.show_sources {
            if let Some(citations) = &turn.citations {
                let labels: Vec<String> =
                    citations.iter().map(|c| format!("[{}]", c)).collect();
                println!("  {}", labels.join(" ").dimmed());
            }
        }
        println!();
    }

    fn print_banner(&self) {
        println!("{}", "SchemesConnect".blue().bold());
        println!("Your one-stop portal for government schemes & citizen services");
        println!("Connected to: {}", self.service_url.green());
        println!("{}", "Type /help for commands.".dimmed());
        println!();
        println!(
            "{}",
            "*Answers may contain mistakes. Always verify important information.".dimmed()
        );
        println!();
    }

    fn print_questions(&self) {
        println!("Suggested questions (type the number to ask):");
        for (i, question) in self.suggested_questions.iter().enumerate() {
            println!("  {}. {}", i + 1, question.green());
        }
        println!();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /questions  Show the suggested quick questions");
        println!("  /new        Start a new conversation");
        println!("  /help       Show this help");
        println!("  /quit       Exit");
        println!("Type a number to ask the matching suggested question.");
        println!();
    }
}
