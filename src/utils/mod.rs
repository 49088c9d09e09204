/// Utilities module - Gateway

pub mod errors;
pub mod logger;

pub use errors::PortalError;
pub use logger::init_logger;
