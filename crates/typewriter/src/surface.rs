//! Where typed output goes.
//!
//! A surface has two independent write contracts:
//!
//! - **Display** ([`DisplaySink`]): per-target markup, replaced in full on
//!   every styled step or appended to on plain steps, then scrolled into view
//! - **Live style** ([`StyleSink`]): one stylesheet that only ever receives
//!   complete statements, appended

use crate::TargetId;
use crate::error::SinkError;

/// Display destinations, addressed by stable identity.
pub trait DisplaySink {
    /// The markup a target currently shows.
    fn markup(&self, target: &TargetId) -> Result<String, SinkError>;

    /// Replace a target's markup.
    fn set_markup(&mut self, target: &TargetId, markup: &str) -> Result<(), SinkError>;

    /// Append raw text to a target.
    fn append_text(&mut self, target: &TargetId, text: &str) -> Result<(), SinkError>;

    /// Bring the end of a target into view. Replacing markup may reset the
    /// scroll position, so this runs after every write.
    fn scroll_into_view(&mut self, target: &TargetId) -> Result<(), SinkError>;
}

/// The live stylesheet.
pub trait StyleSink {
    /// Append complete statements.
    fn append_style(&mut self, css: &str) -> Result<(), SinkError>;
}

/// Everything a sequence writes to.
pub trait Surface: DisplaySink + StyleSink {
    /// Called once after a cancelled sequence has revealed all its output.
    fn on_reveal(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
