//! Ordered typing stages with a reveal fallback.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::TargetId;
use crate::control::ScheduleState;
use crate::error::{SinkError, TypewriterError};
use crate::pacing::PacingConfig;
use crate::scheduler::{Typewriter, WriteMode};
use crate::surface::Surface;

/// A one-off side effect run between typing stages.
pub type Effect<S> = Box<dyn FnOnce(&mut S) -> Result<(), SinkError> + Send>;

/// One step of a sequence.
pub enum Stage<S> {
    /// Type `source` into `target`.
    Type {
        target: TargetId,
        source: String,
        mode: WriteMode,
        /// Overrides the sequence pacing for this stage.
        pacing: Option<PacingConfig>,
    },
    /// Run a side effect against the surface.
    Effect { name: String, effect: Effect<S> },
    /// Idle between stages; pause still holds it.
    Delay(Duration),
}

impl<S> Stage<S> {
    /// Type CSS through the highlighter.
    pub fn styled(target: impl Into<TargetId>, source: impl Into<String>) -> Self {
        Stage::Type {
            target: target.into(),
            source: source.into(),
            mode: WriteMode::Styled,
            pacing: None,
        }
    }

    /// Type prose as is.
    pub fn plain(target: impl Into<TargetId>, source: impl Into<String>) -> Self {
        Stage::Type {
            target: target.into(),
            source: source.into(),
            mode: WriteMode::Plain,
            pacing: None,
        }
    }

    pub fn effect<F>(name: impl Into<String>, effect: F) -> Self
    where
        F: FnOnce(&mut S) -> Result<(), SinkError> + Send + 'static,
    {
        Stage::Effect {
            name: name.into(),
            effect: Box::new(effect),
        }
    }

    pub fn delay(duration: Duration) -> Self {
        Stage::Delay(duration)
    }

    /// Give a typing stage its own pacing. No effect on other stages.
    pub fn with_pacing(mut self, custom: PacingConfig) -> Self {
        if let Stage::Type { pacing, .. } = &mut self {
            *pacing = Some(custom);
        }
        self
    }
}

impl<S> fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Type {
                target,
                source,
                mode,
                pacing,
            } => f
                .debug_struct("Type")
                .field("target", target)
                .field("bytes", &source.len())
                .field("mode", mode)
                .field("pacing", pacing)
                .finish(),
            Stage::Effect { name, .. } => f.debug_struct("Effect").field("name", name).finish(),
            Stage::Delay(duration) => f.debug_tuple("Delay").field(duration).finish(),
        }
    }
}

/// How a sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every stage ran at its own pace.
    Completed,
    /// Cancelled; the remaining output was revealed at once.
    Revealed,
}

/// Runs stages strictly one after another.
///
/// On cancellation no further paced step runs. Instead the interrupted stage
/// and every later typing stage are written in one go, pending effects run,
/// and [`Surface::on_reveal`] is called once. Any other error aborts the
/// sequence as is.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use typewriter::testing::RecordingSurface;
/// use typewriter::{PacingConfig, ScheduleState, SequenceOutcome, Sequencer, Stage};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let mut surface = RecordingSurface::new();
/// let mut sequencer = Sequencer::new(ScheduleState::new())
///     .with_pacing(PacingConfig::default().with_interval(Duration::ZERO))
///     .stage(Stage::styled("style", "a{b:c;}"))
///     .stage(Stage::plain("work", "Hello"));
///
/// let outcome = sequencer.run(&mut surface).await.unwrap();
/// assert_eq!(outcome, SequenceOutcome::Completed);
/// assert_eq!(surface.panel("work"), "Hello");
/// assert_eq!(surface.style(), "a{b:c;}");
/// # });
/// ```
pub struct Sequencer<S> {
    stages: VecDeque<Stage<S>>,
    pacing: PacingConfig,
    typewriter: Typewriter,
    ran: bool,
}

impl<S: Surface> Sequencer<S> {
    pub fn new(control: ScheduleState) -> Self {
        Self {
            stages: VecDeque::new(),
            pacing: PacingConfig::default(),
            typewriter: Typewriter::new(control),
            ran: false,
        }
    }

    /// Pacing for stages that do not set their own.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Append a stage.
    pub fn stage(mut self, stage: Stage<S>) -> Self {
        self.stages.push_back(stage);
        self
    }

    pub fn push(&mut self, stage: Stage<S>) {
        self.stages.push_back(stage);
    }

    pub fn control(&self) -> &ScheduleState {
        self.typewriter.control()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order.
    pub async fn run(&mut self, surface: &mut S) -> Result<SequenceOutcome, TypewriterError> {
        if self.ran {
            return Err(TypewriterError::AlreadyRan);
        }
        self.ran = true;

        let mut index = 0;
        while let Some(stage) = self.stages.pop_front() {
            index += 1;
            if self.control().is_cancelled() {
                self.stages.push_front(stage);
                return self.reveal(surface);
            }

            match stage {
                Stage::Type {
                    target,
                    source,
                    mode,
                    pacing,
                } => {
                    let pacing = pacing.unwrap_or(self.pacing);
                    log::debug!(
                        "sequencer: stage {index} types {} bytes into {target}",
                        source.len()
                    );
                    match self
                        .typewriter
                        .run(surface, &target, &source, mode, &pacing)
                        .await
                    {
                        Ok(()) => {}
                        Err(TypewriterError::Cancelled { consumed }) => {
                            self.typewriter
                                .write_all(surface, &target, &source[consumed..], mode)?;
                            return self.reveal(surface);
                        }
                        Err(err) => return Err(err),
                    }
                }
                Stage::Effect { name, effect } => {
                    log::debug!("sequencer: stage {index} runs effect `{name}`");
                    effect(&mut *surface)?;
                }
                Stage::Delay(duration) => {
                    log::debug!("sequencer: stage {index} idles for {duration:?}");
                    self.typewriter
                        .idle(duration, self.pacing.poll_interval())
                        .await;
                    if self.control().is_cancelled() {
                        return self.reveal(surface);
                    }
                }
            }
        }

        self.typewriter.finish(surface)?;
        log::info!("sequencer: completed {index} stages");
        Ok(SequenceOutcome::Completed)
    }

    /// Finish every remaining stage at once.
    fn reveal(&mut self, surface: &mut S) -> Result<SequenceOutcome, TypewriterError> {
        log::info!(
            "sequencer: cancelled, revealing {} remaining stages",
            self.stages.len()
        );
        while let Some(stage) = self.stages.pop_front() {
            match stage {
                Stage::Type {
                    target,
                    source,
                    mode,
                    ..
                } => self.typewriter.write_all(surface, &target, &source, mode)?,
                Stage::Effect { name, effect } => {
                    log::debug!("sequencer: reveal runs effect `{name}`");
                    effect(&mut *surface)?;
                }
                Stage::Delay(_) => {}
            }
        }
        self.typewriter.finish(surface)?;
        surface.on_reveal()?;
        Ok(SequenceOutcome::Revealed)
    }
}

impl<S> fmt::Debug for Sequencer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("stages", &self.stages)
            .field("pacing", &self.pacing)
            .field("ran", &self.ran)
            .finish()
    }
}
