//! Chain handlers owned by the application.

mod logging;

pub use logging::LoggingHandler;
