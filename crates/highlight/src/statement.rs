//! Raw-text accumulator feeding the live stylesheet.

/// Collects raw (unmarked) characters since the last flush.
///
/// A flush happens exactly when a `;` is pushed, so everything handed out
/// ends on a statement boundary and never splits a token. Comments are kept
/// out by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementBuffer {
    buf: String,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw character. Returns the completed text on `;`.
    pub fn push(&mut self, ch: char) -> Option<String> {
        self.buf.push(ch);
        (ch == ';').then(|| std::mem::take(&mut self.buf))
    }

    /// Characters collected since the last flush.
    pub fn unflushed(&self) -> &str {
        &self.buf
    }

    /// Drain whatever is left after the last statement boundary.
    pub fn take_remaining(&mut self) -> Option<String> {
        (!self.buf.is_empty()).then(|| std::mem::take(&mut self.buf))
    }
}
