//! Token categories and their markup wrappers.

use std::fmt;

use phf::phf_map;

/// A classified span of CSS text, destined for a specific markup wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Everything before a `{`: `a`, `#header > li:hover`.
    Selector,
    /// A property name inside a block: `color`.
    Key,
    /// A property value, up to (not including) the `;`.
    Value,
    /// A full `/* ... */` span, both delimiters included.
    Comment,
    /// A `px` suffix, nested inside whatever token is being built.
    Unit,
}

static CLASS_CATEGORIES: phf::Map<&'static str, Category> = phf_map! {
    "selector" => Category::Selector,
    "key" => Category::Key,
    "value" => Category::Value,
    "comment" => Category::Comment,
    "unit" => Category::Unit,
};

impl Category {
    /// The class attribute used on this category's wrapper.
    pub const fn class_name(self) -> &'static str {
        match self {
            Category::Selector => "selector",
            Category::Key => "key",
            Category::Value => "value",
            Category::Comment => "comment",
            Category::Unit => "unit",
        }
    }

    /// Look a category up by its wrapper class.
    pub fn from_class(class: &str) -> Option<Self> {
        CLASS_CATEGORIES.get(class).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

pub(crate) const CLOSE_TAG: &str = "</span>";

/// Append `body` to `out` wrapped as `category`. Empty bodies emit nothing.
pub(crate) fn wrap_into(out: &mut String, category: Category, body: &str) {
    if body.is_empty() {
        return;
    }
    out.push_str("<span class=\"");
    out.push_str(category.class_name());
    out.push_str("\">");
    out.push_str(body);
    out.push_str(CLOSE_TAG);
}

/// Append a raw character, escaping the ones that are significant in markup.
pub(crate) fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_round_trip() {
        for category in [
            Category::Selector,
            Category::Key,
            Category::Value,
            Category::Comment,
            Category::Unit,
        ] {
            assert_eq!(Category::from_class(category.class_name()), Some(category));
        }
        assert_eq!(Category::from_class("px"), None);
    }

    #[test]
    fn test_wrap_skips_empty_body() {
        let mut out = String::from("{");
        wrap_into(&mut out, Category::Value, "");
        assert_eq!(out, "{");

        wrap_into(&mut out, Category::Value, "red");
        assert_eq!(out, "{<span class=\"value\">red</span>");
    }

    #[test]
    fn test_escape() {
        let mut out = String::new();
        for ch in "a > b & <c>".chars() {
            push_escaped(&mut out, ch);
        }
        assert_eq!(out, "a &gt; b &amp; &lt;c&gt;");
    }
}
