/// Runtime module - Gateway

mod interactive;
mod one_shot;

pub use interactive::InteractiveRunner;
pub use one_shot::{AskResult, OneShotRunner};
