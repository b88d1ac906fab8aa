//! The typing loop.

use std::time::Duration;

use highlight::CssHighlighter;
use tokio::time::Instant;

use crate::TargetId;
use crate::control::ScheduleState;
use crate::error::{SinkError, TypewriterError};
use crate::pacing::{Lookback, PacingConfig};
use crate::surface::Surface;

/// How a chunk reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Through the CSS highlighter: full markup overwrite plus live-style
    /// statements.
    Styled,
    /// Appended as is.
    Plain,
}

/// Drives one source into one target at a human pace.
///
/// Each step slices the next chunk, writes it, then waits a delay chosen from
/// the last few characters written. Cancellation is read at the start of a
/// step and while the delay runs; pause is read after the delay, where the
/// run keeps waiting until it clears. A step that has started always
/// finishes its write.
///
/// The highlighter outlives single runs: its lexical state belongs to
/// whichever target was styled last, and its statement buffer feeds the
/// one live stylesheet.
#[derive(Debug)]
pub struct Typewriter {
    control: ScheduleState,
    highlighter: CssHighlighter,
}

impl Typewriter {
    pub fn new(control: ScheduleState) -> Self {
        Self {
            control,
            highlighter: CssHighlighter::new(),
        }
    }

    pub fn control(&self) -> &ScheduleState {
        &self.control
    }

    pub fn highlighter(&self) -> &CssHighlighter {
        &self.highlighter
    }

    /// Type `source` into `target`.
    ///
    /// Returns [`TypewriterError::Cancelled`] with the number of bytes
    /// already written when the cancel flag is seen.
    pub async fn run<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: &TargetId,
        source: &str,
        mode: WriteMode,
        pacing: &PacingConfig,
    ) -> Result<(), TypewriterError> {
        let mut cursor = 0;
        let mut lookback = Lookback::default();

        while cursor < source.len() {
            if self.control.is_cancelled() {
                log::debug!("typewriter: {target} cancelled at byte {cursor}");
                return Err(TypewriterError::Cancelled { consumed: cursor });
            }

            let end = pacing.chunk_end(source, cursor);
            let chunk = &source[cursor..end];
            self.write(surface, target, chunk, mode)?;
            lookback.extend(chunk);
            cursor = end;

            if cursor < source.len() {
                let delay = pacing.delay_for(lookback.pause());
                self.idle(delay, pacing.poll_interval()).await;
            }
        }

        Ok(())
    }

    /// Write `text` to `target` in a single step, with no pacing.
    pub fn write_all<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: &TargetId,
        text: &str,
        mode: WriteMode,
    ) -> Result<(), SinkError> {
        if text.is_empty() {
            return Ok(());
        }
        self.write(surface, target, text, mode)
    }

    /// Append whatever the live stylesheet has not received yet.
    pub fn finish<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SinkError> {
        if let Some(tail) = self.highlighter.take_remaining() {
            surface.append_style(&tail)?;
        }
        Ok(())
    }

    /// Sleep for `delay`, then keep waiting while paused.
    ///
    /// The flags are checked every `poll`, so cancellation cuts both the
    /// sleep and the pause short; the caller notices it at the next step
    /// boundary.
    pub async fn idle(&self, delay: Duration, poll: Duration) {
        let deadline = Instant::now() + delay;
        while !self.control.is_cancelled() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(poll.min(deadline - now)).await;
        }
        self.hold_while_paused(poll).await;
    }

    async fn hold_while_paused(&self, poll: Duration) {
        if !self.control.is_paused() {
            return;
        }
        log::debug!("typewriter: paused");
        while self.control.is_paused() && !self.control.is_cancelled() {
            tokio::time::sleep(poll).await;
        }
        log::debug!("typewriter: resumed");
    }

    fn write<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: &TargetId,
        chunk: &str,
        mode: WriteMode,
    ) -> Result<(), SinkError> {
        match mode {
            WriteMode::Plain => surface.append_text(target, chunk)?,
            WriteMode::Styled => {
                if !self.highlighter.is_bound_to(target) {
                    let seed = surface.markup(target)?;
                    self.highlighter.bind(target, || seed);
                }
                let statements = self.highlighter.feed_str(chunk);
                surface.set_markup(target, &self.highlighter.markup())?;
                for statement in statements {
                    surface.append_style(&statement)?;
                }
            }
        }
        surface.scroll_into_view(target)
    }
}
