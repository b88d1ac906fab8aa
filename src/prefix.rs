//! Vendor prefix rewriting for the bundled stylesheets.
//!
//! The stylesheets are written with `-webkit-` properties. Before typing
//! starts every occurrence is swapped for the prefix a resolver reports.

/// The literal rewritten in every source.
pub const WEBKIT: &str = "-webkit-";

/// Supplies the vendor prefix for the current display.
pub trait PrefixResolver {
    /// The bare prefix, e.g. `moz`. Empty means "no prefix needed".
    fn prefix(&self) -> &str;

    /// Rewrite `source` with this resolver's prefix.
    fn rewrite(&self, source: &str) -> String {
        rewrite_prefixes(source, self.prefix())
    }
}

/// A prefix fixed up front, usually from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPrefix(String);

impl StaticPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl PrefixResolver for StaticPrefix {
    fn prefix(&self) -> &str {
        &self.0
    }
}

/// Replace every `-webkit-` in `source` with `-{prefix}-`.
///
/// The prefix is lower-cased and may be given with or without its dashes.
/// An empty prefix removes `-webkit-` altogether, leaving the standard
/// property name.
///
/// ```rust
/// use livetype::prefix::rewrite_prefixes;
///
/// assert_eq!(rewrite_prefixes("-webkit-transform: none;", "Moz"), "-moz-transform: none;");
/// assert_eq!(rewrite_prefixes("-webkit-transform: none;", ""), "transform: none;");
/// ```
pub fn rewrite_prefixes(source: &str, prefix: &str) -> String {
    let prefix = prefix.trim_matches('-').to_lowercase();
    if prefix.is_empty() {
        source.replace(WEBKIT, "")
    } else {
        source.replace(WEBKIT, &format!("-{prefix}-"))
    }
}
