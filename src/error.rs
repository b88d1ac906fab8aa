use highlight::HighlightError;
use thiserror::Error;
use typewriter::{SinkError, TypewriterError};

#[derive(Error, Debug)]
pub enum LivetypeError {
    #[error("Terminal error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Animation failed: {0}")]
    Typewriter(#[from] TypewriterError),

    #[error("Display failed: {0}")]
    Sink(#[from] SinkError),

    #[error("Malformed highlight markup: {0}")]
    Highlight(#[from] HighlightError),

    #[error("Could not install the file logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to start the async runtime: {0}")]
    RuntimeInit(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, LivetypeError>;
