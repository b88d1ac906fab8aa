//! Colours read back out of the live stylesheet.
//!
//! Only a small slice of CSS means anything on a terminal:
//!
//! - Subjects: `body` / `*` / `html`, `#panel-id`, and `.class` for the
//!   highlight categories (`.comment`, `.value .unit`, ...). The last
//!   compound of a selector decides the subject; selectors with
//!   pseudo-classes are skipped.
//! - Properties: `color`, `background`, `background-color`, `border-color`,
//!   `font-weight`.
//! - Colours: named, `#rgb`, `#rrggbb`, `rgb(r, g, b)`.
//!
//! Later rules override earlier ones. A trailing unterminated declaration
//! is ignored, so a stylesheet that is still being typed reads cleanly.

use std::collections::HashMap;

use crossterm::style::Color;
use highlight::Category;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::{char, multispace0, multispace1, u8 as dec_u8},
    combinator::{all_consuming, map, rest, value},
    multi::many0,
    sequence::{delimited, preceded, terminated, tuple},
};
use phf::phf_map;

static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 128, 0),
    "lime" => (0, 255, 0),
    "blue" => (0, 0, 255),
    "navy" => (0, 0, 128),
    "yellow" => (255, 255, 0),
    "olive" => (128, 128, 0),
    "cyan" => (0, 255, 255),
    "aqua" => (0, 255, 255),
    "teal" => (0, 128, 128),
    "magenta" => (255, 0, 255),
    "fuchsia" => (255, 0, 255),
    "purple" => (128, 0, 128),
    "maroon" => (128, 0, 0),
    "orange" => (255, 165, 0),
    "silver" => (192, 192, 192),
    "gray" => (128, 128, 128),
    "grey" => (128, 128, 128),
};

/// Terminal attributes for one subject. `None` leaves the inherited value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paint {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub border: Option<Color>,
    pub bold: Option<bool>,
}

impl Paint {
    /// `over` layered on top of `self`.
    pub fn patch(self, over: Paint) -> Paint {
        Paint {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            border: over.border.or(self.border),
            bold: over.bold.or(self.bold),
        }
    }

    fn apply(&mut self, declaration: &Declaration) {
        match *declaration {
            Declaration::Color(color) => self.fg = Some(color),
            Declaration::Background(color) => self.bg = Some(color),
            Declaration::BorderColor(color) => self.border = Some(color),
            Declaration::Bold(bold) => self.bold = Some(bold),
            Declaration::Unknown => {}
        }
    }
}

/// A declaration the terminal understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Color(Color),
    Background(Color),
    BorderColor(Color),
    Bold(bool),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Subject {
    Body,
    Panel(String),
    Token(Category),
}

/// Paints for the whole screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    body: Paint,
    panels: HashMap<String, Paint>,
    tokens: HashMap<Category, Paint>,
}

impl Theme {
    pub fn from_stylesheet(css: &str) -> Self {
        let mut theme = Self::default();
        theme.apply(css);
        theme
    }

    /// Layer the rules of `css` over the current paints.
    pub fn apply(&mut self, css: &str) {
        let mut input = css;
        while let Ok((remaining, (selectors, body, closed))) = rule(input) {
            input = remaining;
            let declarations = declarations(body, closed);
            if declarations.is_empty() {
                continue;
            }
            for target in selectors.split(',').filter_map(subject) {
                let paint = match target {
                    Subject::Body => &mut self.body,
                    Subject::Panel(id) => self.panels.entry(id).or_default(),
                    Subject::Token(category) => self.tokens.entry(category).or_default(),
                };
                for declaration in &declarations {
                    paint.apply(declaration);
                }
            }
        }
    }

    /// Paint for a panel's frame and plain text.
    pub fn panel(&self, id: &str) -> Paint {
        match self.panels.get(id) {
            Some(paint) => self.body.patch(*paint),
            None => self.body,
        }
    }

    /// Paint for a run of text inside a panel.
    pub fn token(&self, panel: &str, category: Option<Category>) -> Paint {
        let base = self.panel(panel);
        match category.and_then(|c| self.tokens.get(&c)) {
            Some(paint) => base.patch(*paint),
            None => base,
        }
    }
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), comment))))(input)
}

/// `selectors { body }`, where the closing brace may still be missing.
fn rule(input: &str) -> IResult<&str, (&str, &str, bool)> {
    let (input, _) = trivia(input)?;
    let (input, selectors) = terminated(take_until("{"), char('{'))(input)?;
    let (input, (body, closed)) = alt((
        map(terminated(take_until("}"), char('}')), |body| (body, true)),
        map(rest, |body| (body, false)),
    ))(input)?;
    Ok((input, (selectors, body, closed)))
}

fn declarations(body: &str, closed: bool) -> Vec<Declaration> {
    let mut pieces: Vec<&str> = body.split(';').collect();
    if !closed {
        // still being typed
        pieces.pop();
    }
    pieces
        .into_iter()
        .filter_map(|piece| piece.split_once(':'))
        .map(|(name, value)| parse_declaration(name.trim(), value.trim()))
        .filter(|d| *d != Declaration::Unknown)
        .collect()
}

fn subject(selector: &str) -> Option<Subject> {
    let last = selector
        .split(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
        .rfind(|part| !part.is_empty())?;
    if last.contains(':') {
        return None;
    }
    if let Some(id) = last.strip_prefix('#') {
        return Some(Subject::Panel(id.to_string()));
    }
    if let Some(class) = last.strip_prefix('.') {
        return Category::from_class(class).map(Subject::Token);
    }
    matches!(last, "body" | "html" | "*").then_some(Subject::Body)
}

/// Interpret one `name: value` pair.
pub fn parse_declaration(name: &str, value: &str) -> Declaration {
    let first = value.split_whitespace().next().unwrap_or("");
    match name.to_ascii_lowercase().as_str() {
        "color" => parse_color(value).map_or(Declaration::Unknown, Declaration::Color),
        "background" | "background-color" => {
            parse_color(first).map_or(Declaration::Unknown, Declaration::Background)
        }
        "border-color" => parse_color(first).map_or(Declaration::Unknown, Declaration::BorderColor),
        "font-weight" => match first {
            "bold" | "bolder" => Declaration::Bold(true),
            "normal" | "lighter" => Declaration::Bold(false),
            weight => weight
                .parse::<u16>()
                .map_or(Declaration::Unknown, |w| Declaration::Bold(w >= 600)),
        },
        _ => Declaration::Unknown,
    }
}

fn hex_digits(input: &str) -> IResult<&str, &str> {
    preceded(
        char('#'),
        take_while_m_n(3, 6, |c: char| c.is_ascii_hexdigit()),
    )(input)
}

fn channel(input: &str) -> IResult<&str, u8> {
    delimited(multispace0, dec_u8, multispace0)(input)
}

fn rgb_function(input: &str) -> IResult<&str, (u8, u8, u8)> {
    delimited(
        tag("rgb("),
        tuple((
            channel,
            preceded(char(','), channel),
            preceded(char(','), channel),
        )),
        char(')'),
    )(input)
}

/// Parse a CSS colour into a terminal colour.
///
/// ```rust
/// use crossterm::style::Color;
/// use livetype::theme::parse_color;
///
/// assert_eq!(parse_color("#f00"), Some(Color::Rgb { r: 255, g: 0, b: 0 }));
/// assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Color::Rgb { r: 1, g: 2, b: 3 }));
/// assert_eq!(parse_color("Navy"), Some(Color::Rgb { r: 0, g: 0, b: 128 }));
/// assert_eq!(parse_color("#abcd"), None);
/// ```
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();
    let (r, g, b) = if let Ok((_, digits)) = all_consuming(hex_digits)(input) {
        expand_hex(digits)?
    } else if let Ok((_, rgb)) = all_consuming(rgb_function)(input) {
        rgb
    } else {
        NAMED_COLORS
            .get(input.to_ascii_lowercase().as_str())
            .copied()?
    };
    Some(Color::Rgb { r, g, b })
}

fn expand_hex(digits: &str) -> Option<(u8, u8, u8)> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut chars = digits.chars().map(|c| channel(&format!("{c}{c}")));
            Some((chars.next()??, chars.next()??, chars.next()??))
        }
        6 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}
