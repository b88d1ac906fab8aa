//! Reading highlight markup back into text.
//!
//! - [`segments`]: split markup into runs tagged with their innermost category
//! - [`strip_markup`]: recover the raw source text
//!
//! Only the markup this crate produces is understood: `<span class="…">`
//! wrappers, `</span>`, and the `&amp;` / `&lt;` / `&gt;` escapes.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag},
    combinator::{map, value},
    sequence::delimited,
};

use crate::HighlightError;
use crate::category::{CLOSE_TAG, Category};

/// A run of text sharing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Innermost open category, `None` for unclassified text.
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece<'a> {
    Open(&'a str),
    Close,
    Text(&'a str),
    Char(char),
}

fn open_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("<span class=\""), is_not("\""), tag("\">"))(input)
}

fn entity(input: &str) -> IResult<&str, char> {
    alt((
        value('&', tag("&amp;")),
        value('<', tag("&lt;")),
        value('>', tag("&gt;")),
    ))(input)
}

fn piece(input: &str) -> IResult<&str, Piece<'_>> {
    alt((
        map(open_tag, Piece::Open),
        value(Piece::Close, tag(CLOSE_TAG)),
        map(entity, Piece::Char),
        map(is_not("<&"), Piece::Text),
        // a bare ampersand is just text
        value(Piece::Char('&'), tag("&")),
    ))(input)
}

/// Split `markup` into category-tagged text runs.
///
/// Adjacent runs with the same category are merged. A `unit` nested inside
/// a `value` is reported as `unit`.
///
/// # Examples
///
/// ```rust
/// use highlight::Category;
/// use highlight::markup::segments;
///
/// let runs = segments("<span class=\"key\">color</span>:").unwrap();
/// assert_eq!(runs[0].category, Some(Category::Key));
/// assert_eq!(runs[1].text, ":");
/// ```
pub fn segments(markup: &str) -> Result<Vec<Segment>, HighlightError> {
    let mut runs: Vec<Segment> = Vec::new();
    let mut open: Vec<Category> = Vec::new();
    let mut input = markup;

    while !input.is_empty() {
        let offset = markup.len() - input.len();
        let (rest, piece) = piece(input).map_err(|_| HighlightError::Malformed(offset))?;
        input = rest;

        let category = open.last().copied();
        match piece {
            Piece::Open(class) => {
                let category =
                    Category::from_class(class).ok_or_else(|| HighlightError::UnknownClass {
                        class: class.to_string(),
                        offset,
                    })?;
                open.push(category);
            }
            Piece::Close => {
                open.pop().ok_or(HighlightError::UnbalancedClose(offset))?;
            }
            Piece::Text(text) => push_run(&mut runs, category, text),
            Piece::Char(ch) => push_run(&mut runs, category, ch.encode_utf8(&mut [0; 4])),
        }
    }

    match open.pop() {
        Some(category) => Err(HighlightError::Unclosed(category)),
        None => Ok(runs),
    }
}

fn push_run(runs: &mut Vec<Segment>, category: Option<Category>, text: &str) {
    match runs.last_mut() {
        Some(last) if last.category == category => last.text.push_str(text),
        _ => runs.push(Segment {
            text: text.to_string(),
            category,
        }),
    }
}

/// Remove all category wrappers and unescape entities.
///
/// # Examples
///
/// ```rust
/// use highlight::markup::strip_markup;
///
/// let raw = strip_markup("<span class=\"selector\">ul &gt; li</span>{").unwrap();
/// assert_eq!(raw, "ul > li{");
/// ```
pub fn strip_markup(markup: &str) -> Result<String, HighlightError> {
    Ok(segments(markup)?.into_iter().map(|s| s.text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_unit_inside_value() {
        let runs =
            segments("<span class=\"value\">10<span class=\"unit\">px</span> 0</span>;").unwrap();
        let tagged: Vec<_> = runs.iter().map(|r| (r.text.as_str(), r.category)).collect();
        assert_eq!(
            tagged,
            vec![
                ("10", Some(Category::Value)),
                ("px", Some(Category::Unit)),
                (" 0", Some(Category::Value)),
                (";", None),
            ]
        );
    }

    #[test]
    fn test_adjacent_runs_merge() {
        let runs = segments("a &amp; b").unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a & b");
    }

    #[test]
    fn test_bare_ampersand_is_text() {
        assert_eq!(strip_markup("a & b").unwrap(), "a & b");
    }

    #[test]
    fn test_errors() {
        assert_eq!(strip_markup("a < b"), Err(HighlightError::Malformed(2)));
        assert_eq!(strip_markup("a</span>"), Err(HighlightError::UnbalancedClose(1)));
        assert_eq!(
            strip_markup("<span class=\"comment\">/*"),
            Err(HighlightError::Unclosed(Category::Comment))
        );
        assert!(matches!(
            strip_markup("<span class=\"px\">px</span>"),
            Err(HighlightError::UnknownClass { offset: 0, .. })
        ));
    }

    #[test]
    fn test_empty_markup() {
        assert!(segments("").unwrap().is_empty());
    }
}
