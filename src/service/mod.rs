/// Answer service module - Gateway

mod http;
mod traits;
mod types;

pub use http::HttpAnswerService;
pub use traits::AnswerService;
#[cfg(test)]
pub use traits::MockAnswerService;
pub use types::{Answer, ServiceError};
