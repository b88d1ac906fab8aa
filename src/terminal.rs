//! The [`Surface`] a sequence types into.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use highlight::TargetId;
use typewriter::{DisplaySink, SinkError, StyleSink, Surface};

use crate::screen::Screen;

/// A shared handle on the [`Screen`].
///
/// One clone is lent to the running sequence, another stays with the event
/// loop for pause indicators and resizes. Every call holds the lock only for
/// the duration of one write.
pub struct TerminalSurface<W: Write> {
    screen: Arc<Mutex<Screen<W>>>,
}

impl<W: Write> Clone for TerminalSurface<W> {
    fn clone(&self) -> Self {
        Self {
            screen: Arc::clone(&self.screen),
        }
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(screen: Screen<W>) -> Self {
        Self {
            screen: Arc::new(Mutex::new(screen)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Screen<W>>, SinkError> {
        self.screen
            .lock()
            .map_err(|_| SinkError::Other("terminal screen lock poisoned".to_string()))
    }

    /// Read the screen state.
    pub fn inspect<T>(&self, f: impl FnOnce(&Screen<W>) -> T) -> Result<T, SinkError> {
        Ok(f(&*self.lock()?))
    }

    pub fn show_panel(&self, id: &TargetId) -> Result<(), SinkError> {
        self.lock()?.show(id)
    }

    pub fn set_paused(&self, paused: bool) -> Result<(), SinkError> {
        self.lock()?.set_paused(paused)
    }

    /// Mark the sequence as over in the status line.
    pub fn finish(&self, revealed: bool) -> Result<(), SinkError> {
        self.lock()?.finish(revealed)
    }

    pub fn resize(&self, cols: u16, rows: u16) -> Result<(), SinkError> {
        self.lock()?.resize(cols, rows)
    }

    pub fn redraw(&self) -> Result<(), SinkError> {
        self.lock()?.redraw()
    }
}

impl<W: Write> DisplaySink for TerminalSurface<W> {
    fn markup(&self, target: &TargetId) -> Result<String, SinkError> {
        self.lock()?.markup(target)
    }

    fn set_markup(&mut self, target: &TargetId, markup: &str) -> Result<(), SinkError> {
        self.lock()?.set_markup(target, markup)
    }

    fn append_text(&mut self, target: &TargetId, text: &str) -> Result<(), SinkError> {
        self.lock()?.append_text(target, text)
    }

    fn scroll_into_view(&mut self, target: &TargetId) -> Result<(), SinkError> {
        // panels always draw their tail; only check the target exists
        self.lock()?.markup(target).map(drop)
    }
}

impl<W: Write> StyleSink for TerminalSurface<W> {
    fn append_style(&mut self, css: &str) -> Result<(), SinkError> {
        self.lock()?.append_style(css)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn on_reveal(&mut self) -> Result<(), SinkError> {
        log::debug!("terminal: revealed, redrawing");
        self.lock()?.redraw()
    }
}
