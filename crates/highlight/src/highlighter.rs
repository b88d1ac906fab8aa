//! The classifier and the statement buffer wired together for one stream.

use crate::statement::StatementBuffer;
use crate::state::LexState;
use crate::target::TargetId;

/// Incremental CSS highlighter.
///
/// Feeds each character to the [`LexState`] of the bound target and mirrors
/// every character classified outside a comment into a [`StatementBuffer`].
/// The statement buffer is shared across targets: it models the one live
/// stylesheet the whole stream restyles.
///
/// # Examples
///
/// ```rust
/// use highlight::{CssHighlighter, TargetId};
///
/// let mut hl = CssHighlighter::new();
/// hl.bind(&TargetId::from("style"), String::new);
///
/// let flushes = hl.feed_str("a{color:red;}");
/// assert_eq!(flushes, vec!["a{color:red;".to_string()]);
/// assert!(hl.markup().contains("<span class=\"key\">color</span>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CssHighlighter {
    state: LexState,
    statements: StatementBuffer,
}

impl CssHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the lexical state currently belongs to `target`.
    pub fn is_bound_to(&self, target: &TargetId) -> bool {
        self.state.target() == Some(target)
    }

    /// Make `target` the owner of the lexical state.
    ///
    /// If the state belongs to another target (or none), it is discarded and
    /// restarted after `seed()`, the target's current, already classified
    /// markup. Returns `true` when such a reset happened.
    pub fn bind(&mut self, target: &TargetId, seed: impl FnOnce() -> String) -> bool {
        if self.is_bound_to(target) {
            return false;
        }
        log::debug!(
            "highlighter: rebinding from {:?} to {}",
            self.state.target().map(TargetId::as_str),
            target
        );
        self.state = LexState::for_target(target.clone(), &seed());
        true
    }

    /// Classify one character. Returns a live-style flush on a statement
    /// boundary outside a comment.
    pub fn feed(&mut self, ch: char) -> Option<String> {
        let was_in_comment = self.state.in_comment();
        self.state.push(ch);
        if was_in_comment || self.state.in_comment() {
            return None;
        }
        let flushed = self.statements.push(ch);
        if let Some(statement) = &flushed {
            log::trace!("highlighter: statement ready ({} bytes)", statement.len());
        }
        flushed
    }

    /// Classify a chunk, collecting the flushes it produced in order.
    pub fn feed_str(&mut self, chunk: &str) -> Vec<String> {
        chunk.chars().filter_map(|ch| self.feed(ch)).collect()
    }

    /// Display markup for the bound target.
    pub fn markup(&self) -> String {
        self.state.markup()
    }

    pub fn state(&self) -> &LexState {
        &self.state
    }

    /// Raw text that has not reached a statement boundary yet.
    pub fn unflushed(&self) -> &str {
        self.statements.unflushed()
    }

    /// Drain the unflushed tail, e.g. the final `}` of a stylesheet.
    pub fn take_remaining(&mut self) -> Option<String> {
        self.statements.take_remaining()
    }
}
