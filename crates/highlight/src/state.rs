//! The character classifier: a per-target lexical state advanced one
//! character at a time.
//!
//! Classification is deferred until a structural delimiter (`{`, `}`, `:`,
//! `;` or a comment boundary) proves what kind of token just ended. Until
//! then the characters wait in `pending`. Each step only looks at the
//! incoming character and the last couple of bytes of `pending`, so the cost
//! of a step does not depend on how much text has already been finalized.

use bitflags::bitflags;

use crate::category::{Category, push_escaped, wrap_into};
use crate::target::TargetId;

bitflags! {
    /// Lexical mode flags carried between characters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LexFlags: u8 {
        /// Inside an unterminated `/* ... */` span.
        const COMMENT_OPEN = 1 << 0;
        /// Inside a `{ ... }` declaration block; `:` separates a property.
        const BLOCK_OPEN = 1 << 1;
    }
}

/// What a single [`LexState::push`] did with its character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The character is waiting in `pending`.
    Buffered,
    /// `finalized` grew; `pending` was resolved or the character needed no
    /// classification.
    Finalized,
    /// A `*/` closed the open comment into a comment token.
    CommentClosed,
}

/// Lexical state for one display target.
///
/// `finalized` only ever grows and never holds an unclosed wrapper.
/// `pending` holds the token currently being built. Stripping the markup
/// from `finalized + pending` yields exactly the raw characters consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexState {
    target: Option<TargetId>,
    finalized: String,
    pending: String,
    flags: LexFlags,
}

impl LexState {
    /// Create an unbound state with nothing consumed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state owned by `target`, continuing after `seed`.
    ///
    /// `seed` must be markup that is already fully classified, typically
    /// whatever the target displays from an earlier run.
    pub fn for_target(target: TargetId, seed: &str) -> Self {
        Self {
            target: Some(target),
            finalized: seed.to_owned(),
            ..Self::default()
        }
    }

    pub fn target(&self) -> Option<&TargetId> {
        self.target.as_ref()
    }

    pub fn finalized(&self) -> &str {
        &self.finalized
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn flags(&self) -> LexFlags {
        self.flags
    }

    pub fn in_comment(&self) -> bool {
        self.flags.contains(LexFlags::COMMENT_OPEN)
    }

    pub fn in_block(&self) -> bool {
        self.flags.contains(LexFlags::BLOCK_OPEN)
    }

    /// The full display markup: `finalized` followed by `pending`.
    pub fn markup(&self) -> String {
        let mut out = String::with_capacity(self.finalized.len() + self.pending.len());
        out.push_str(&self.finalized);
        out.push_str(&self.pending);
        out
    }

    /// Classify one character.
    pub fn push(&mut self, ch: char) -> Step {
        if ch == '/' {
            return self.slash();
        }

        if self.in_comment() {
            push_escaped(&mut self.pending, ch);
            return Step::Buffered;
        }

        match ch {
            '{' => {
                self.resolve(Category::Selector, '{');
                self.flags.insert(LexFlags::BLOCK_OPEN);
                Step::Finalized
            }
            '}' => {
                self.finalized.push_str(&self.pending);
                self.pending.clear();
                self.finalized.push('}');
                self.flags.remove(LexFlags::BLOCK_OPEN);
                Step::Finalized
            }
            ':' if self.in_block() => {
                self.resolve(Category::Key, ':');
                Step::Finalized
            }
            ';' => {
                self.resolve(Category::Value, ';');
                Step::Finalized
            }
            'x' => {
                self.pending.push('x');
                if self.pending.ends_with("px") {
                    let cut = self.pending.len() - 2;
                    self.pending.truncate(cut);
                    wrap_into(&mut self.pending, Category::Unit, "px");
                }
                Step::Buffered
            }
            ' ' | '\n' | '\t' => {
                if self.pending.is_empty() {
                    self.finalized.push(ch);
                    Step::Finalized
                } else {
                    self.pending.push(ch);
                    Step::Buffered
                }
            }
            c => {
                push_escaped(&mut self.pending, c);
                Step::Buffered
            }
        }
    }

    /// Classify every character of `chunk` in order.
    pub fn push_str(&mut self, chunk: &str) {
        for ch in chunk.chars() {
            self.push(ch);
        }
    }

    /// Wrap `pending` as `category`, then append the delimiter that ended it.
    fn resolve(&mut self, category: Category, delimiter: char) {
        wrap_into(&mut self.finalized, category, &self.pending);
        self.pending.clear();
        self.finalized.push(delimiter);
    }

    /// A `/` opens a comment, or closes the open one after a `*`.
    fn slash(&mut self) -> Step {
        if !self.in_comment() {
            // whatever preceded the slash is plain content
            self.finalized.push_str(&self.pending);
            self.pending.clear();
            self.pending.push('/');
            self.flags.insert(LexFlags::COMMENT_OPEN);
            return Step::Buffered;
        }

        self.pending.push('/');
        if self.pending.ends_with("*/") {
            wrap_into(&mut self.finalized, Category::Comment, &self.pending);
            self.pending.clear();
            self.flags.remove(LexFlags::COMMENT_OPEN);
            Step::CommentClosed
        } else {
            Step::Buffered
        }
    }
}

/// Pure form of [`LexState::push`]: consume `state`, return its successor.
pub fn classify(mut state: LexState, ch: char) -> LexState {
    state.push(ch);
    state
}
