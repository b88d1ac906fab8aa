//! # typewriter - human-paced typing into highlighted panels
//!
//! Streams source text into display targets a chunk at a time, pausing the
//! way a person would at sentence, paragraph and comma boundaries. CSS
//! sources go through the [`highlight`] classifier, so the panel shows
//! syntax-highlighted markup while complete statements are mirrored into a
//! live stylesheet.
//!
//! ## Pieces
//!
//! - [`ScheduleState`]: pause/cancel flags, set from outside
//! - [`PacingConfig`] and [`Lookback`]: the cadence
//! - [`Surface`]: where output goes ([`DisplaySink`] + [`StyleSink`])
//! - [`Typewriter`]: one paced run of one source into one target
//! - [`Sequencer`]: ordered stages with a reveal-everything fallback
//!
//! ## Concurrency
//!
//! Everything runs on one cooperative timeline. Flags are only read between
//! writes, so a flag flipped between ticks is seen at the next tick and a
//! write in progress always completes.

pub mod control;
pub mod error;
pub mod pacing;
pub mod scheduler;
pub mod sequencer;
pub mod surface;
pub mod testing;

pub use control::ScheduleState;
pub use error::{SinkError, TypewriterError};
pub use highlight::TargetId;
pub use pacing::{Lookback, PacingConfig, Pause};
pub use scheduler::{Typewriter, WriteMode};
pub use sequencer::{Effect, SequenceOutcome, Sequencer, Stage};
pub use surface::{DisplaySink, StyleSink, Surface};
