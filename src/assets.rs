//! The bundled demo payloads.

use crate::prefix::PrefixResolver;

/// The stylesheet, in the four parts typed between the other stages.
pub const STYLES: [&str; 4] = [
    include_str!("../assets/style-0.css"),
    include_str!("../assets/style-1.css"),
    include_str!("../assets/style-2.css"),
    include_str!("../assets/style-3.css"),
];

/// Prose for the notes panel.
pub const WORK: &str = include_str!("../assets/work.txt");

/// Text for the key panel.
pub const KEY: &str = include_str!("../assets/key.txt");

/// Payloads ready to be typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub styles: [String; 4],
    pub work: String,
    pub key: String,
}

impl Script {
    /// The bundled payloads, with vendor prefixes rewritten by `resolver`.
    pub fn bundled(resolver: &dyn PrefixResolver) -> Self {
        Self {
            styles: STYLES.map(|css| resolver.rewrite(css)),
            work: WORK.to_string(),
            key: KEY.to_string(),
        }
    }

    /// The whole stylesheet as it ends up in the style panel.
    pub fn stylesheet(&self) -> String {
        self.styles.concat()
    }
}
