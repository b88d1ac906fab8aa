//! In-memory surface for tests.
//!
//! [`RecordingSurface`] keeps every panel as a string, records the order of
//! operations, and can be told to fail on a target to exercise error paths.
//!
//! ```rust
//! use typewriter::testing::{Op, RecordingSurface};
//! use typewriter::{DisplaySink, StyleSink, TargetId};
//!
//! let mut surface = RecordingSurface::new();
//! let work = TargetId::from("work");
//! surface.append_text(&work, "Hi").unwrap();
//! surface.append_style("a{b:c;").unwrap();
//!
//! assert_eq!(surface.panel("work"), "Hi");
//! assert_eq!(surface.ops()[0], Op::Append(work));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::TargetId;
use crate::error::SinkError;
use crate::surface::{DisplaySink, StyleSink, Surface};

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    SetMarkup(TargetId),
    Append(TargetId),
    Scroll(TargetId),
    Style(String),
    Reveal,
    /// Recorded by test effects through [`RecordingSurface::note`].
    Note(String),
}

/// A surface backed by strings.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    panels: BTreeMap<TargetId, String>,
    style: String,
    ops: Vec<Op>,
    writes: Arc<AtomicUsize>,
    failing: Option<TargetId>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `target` with some existing markup.
    pub fn with_panel(mut self, target: impl Into<TargetId>, markup: impl Into<String>) -> Self {
        self.panels.insert(target.into(), markup.into());
        self
    }

    /// Make every write to `target` fail.
    pub fn failing_on(mut self, target: impl Into<TargetId>) -> Self {
        self.failing = Some(target.into());
        self
    }

    /// Current markup of a panel, empty if it was never written.
    pub fn panel(&self, target: &str) -> &str {
        self.panels
            .get(&TargetId::from(target))
            .map_or("", String::as_str)
    }

    /// Everything appended to the live stylesheet.
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Record a marker, e.g. from an effect stage.
    pub fn note(&mut self, text: impl Into<String>) {
        self.ops.push(Op::Note(text.into()));
    }

    pub fn reveals(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Reveal).count()
    }

    /// Number of display writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// A handle on the display write count that can be read while the
    /// surface is borrowed by a running sequence.
    pub fn write_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.writes)
    }

    fn check(&self, target: &TargetId) -> Result<(), SinkError> {
        match &self.failing {
            Some(failing) if failing == target => {
                Err(SinkError::Other(format!("injected failure on {target}")))
            }
            _ => Ok(()),
        }
    }
}

impl DisplaySink for RecordingSurface {
    fn markup(&self, target: &TargetId) -> Result<String, SinkError> {
        Ok(self.panels.get(target).cloned().unwrap_or_default())
    }

    fn set_markup(&mut self, target: &TargetId, markup: &str) -> Result<(), SinkError> {
        self.check(target)?;
        self.panels.insert(target.clone(), markup.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.ops.push(Op::SetMarkup(target.clone()));
        Ok(())
    }

    fn append_text(&mut self, target: &TargetId, text: &str) -> Result<(), SinkError> {
        self.check(target)?;
        self.panels.entry(target.clone()).or_default().push_str(text);
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.ops.push(Op::Append(target.clone()));
        Ok(())
    }

    fn scroll_into_view(&mut self, target: &TargetId) -> Result<(), SinkError> {
        self.ops.push(Op::Scroll(target.clone()));
        Ok(())
    }
}

impl StyleSink for RecordingSurface {
    fn append_style(&mut self, css: &str) -> Result<(), SinkError> {
        self.style.push_str(css);
        self.ops.push(Op::Style(css.to_string()));
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn on_reveal(&mut self) -> Result<(), SinkError> {
        self.ops.push(Op::Reveal);
        Ok(())
    }
}
