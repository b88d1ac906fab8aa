//! Error types for typing runs.
//!
//! Cancellation is carried as [`TypewriterError::Cancelled`] so it can travel
//! up through `?` like any other early exit, but it is not a fault: the
//! [`Sequencer`](crate::Sequencer) catches it and reveals everything instead.

use thiserror::Error;

use crate::TargetId;

/// Failures reported by a display or live-style destination.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The surface has no destination with this identity.
    #[error("unknown display target `{0}`")]
    UnknownTarget(TargetId),

    /// Writing to the underlying device failed.
    #[error("display I/O error")]
    Io(#[from] std::io::Error),

    /// Any other destination-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Errors that end a typing run or a whole sequence.
#[derive(Error, Debug)]
pub enum TypewriterError {
    /// The cancel flag was observed. `consumed` is the byte offset of the
    /// source already written when the run stopped.
    #[error("animation cancelled after {consumed} bytes")]
    Cancelled { consumed: usize },

    /// A destination failed; the sequence is aborted.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// [`Sequencer::run`](crate::Sequencer::run) was called a second time.
    #[error("the sequence has already run")]
    AlreadyRan,
}

impl TypewriterError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TypewriterError::Cancelled { .. })
    }
}
