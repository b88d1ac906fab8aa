//! # highlight - incremental CSS highlighting
//!
//! Classifies a CSS source that arrives one character (or a small chunk) at
//! a time, without ever re-scanning text that has already been classified.
//! Two outputs come out of the stream:
//!
//! - **Display markup**: `finalized + pending`, with each resolved token in a
//!   `<span class="…">` wrapper (see [`Category`])
//! - **Live-style statements**: raw text handed out at every `;` outside a
//!   comment, safe to append to a stylesheet that is being applied
//!
//! ## Quick Start
//!
//! ```rust
//! use highlight::{CssHighlighter, TargetId};
//! use highlight::markup::strip_markup;
//!
//! let mut hl = CssHighlighter::new();
//! hl.bind(&TargetId::from("style-text"), String::new);
//!
//! let mut live = String::new();
//! for ch in "/* hi */ body { margin: 0px; }".chars() {
//!     if let Some(statement) = hl.feed(ch) {
//!         live.push_str(&statement);
//!     }
//! }
//!
//! assert_eq!(live, " body { margin: 0px;");
//! assert_eq!(strip_markup(&hl.markup()).unwrap(), "/* hi */ body { margin: 0px; }");
//! ```
//!
//! ## Classification
//!
//! Nothing is classified until a delimiter proves what just ended:
//!
//! - `{` closes a *selector*; `}` closes the block verbatim
//! - `:` inside a block closes a *key*; outside it is part of the selector
//!   (`a:hover`)
//! - `;` closes a *value* and is the statement boundary
//! - any `/` opens a *comment* and `*/` closes it; nothing inside it is
//!   classified
//! - a `px` suffix is wrapped as a *unit* as soon as the `x` arrives
//!
//! Malformed input is never rejected. An unterminated comment simply leaves
//! the state with the comment open.
//!
//! ## Modules
//!
//! - [`state`]: the per-target classifier
//! - [`statement`]: the live-style accumulator
//! - [`markup`]: reading markup back (strip, segment)

pub mod category;
pub mod error;
pub mod highlighter;
pub mod markup;
pub mod state;
pub mod statement;
pub mod target;

pub use category::Category;
pub use error::HighlightError;
pub use highlighter::CssHighlighter;
pub use state::{LexFlags, LexState, Step, classify};
pub use statement::StatementBuffer;
pub use target::TargetId;
