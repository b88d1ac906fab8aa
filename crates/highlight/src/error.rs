//! Error types for reading highlighted markup back.
//!
//! The classifier itself never fails: malformed CSS degrades into plain or
//! dangling output. Errors only arise when markup produced elsewhere is fed
//! to the [`markup`](crate::markup) reader.

use thiserror::Error;

use crate::category::Category;

/// Errors that can occur while reading highlight markup.
///
/// # Examples
///
/// ```rust
/// use highlight::markup::strip_markup;
/// use highlight::HighlightError;
///
/// let result = strip_markup("<span class=\"bogus\">a</span>");
/// assert!(matches!(result, Err(HighlightError::UnknownClass { .. })));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A `<` that does not start a recognised wrapper tag.
    #[error("malformed markup at byte {0}")]
    Malformed(usize),

    /// A wrapper tag whose class names no known category.
    #[error("unknown highlight class `{class}` at byte {offset}")]
    UnknownClass { class: String, offset: usize },

    /// A closing tag with no category open.
    #[error("closing tag without an open category at byte {0}")]
    UnbalancedClose(usize),

    /// The markup ended while a category was still open.
    #[error("`{0}` category left open at end of markup")]
    Unclosed(Category),
}
