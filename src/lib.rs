pub mod app;
pub mod cli;
pub mod constants;
pub mod runtime;
pub mod service;
pub mod session;
pub mod store;
pub mod utils;

pub use app::{load_config, Config};
pub use service::{Answer, AnswerService, HttpAnswerService, ServiceError};
pub use session::{ChatSession, Speaker, SubmitOutcome, Transcript, Turn};
pub use utils::PortalError;
