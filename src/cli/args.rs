use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "schemesconnect")]
#[command(version = "0.1.0")]
#[command(about = "Chat with the SchemesConnect citizen-services assistant", long_about = None)]
pub struct Cli {
    /// Answer service base URL (e.g., http://localhost:8000)
    #[arg(short = 'u', long)]
    pub service_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask a single question and exit instead of starting the chat loop
    #[arg(short, long)]
    pub question: Option<String>,

    /// Output format for one-shot mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "question")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start a chat session (default)
    Chat,
    /// Print the suggested quick questions
    Questions,
    /// Show version information
    Version,
    /// Check whether the answer service is reachable
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}
