//! Panels laid out on the terminal and drawn with crossterm.
//!
//! The first visible panel fills the left half, the others share the right
//! half top to bottom, and the last row is a status line. Every panel shows
//! the tail of its content, so the newest text is always in view.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use highlight::markup::{Segment, segments};
use highlight::{Category, TargetId};
use typewriter::SinkError;
use unicode_display_width::width as display_width_impl;
use unicode_segmentation::UnicodeSegmentation;

use crate::theme::{Paint, Theme};

/// How a panel's content is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Highlight markup.
    Styled,
    /// Raw text.
    Plain,
}

/// A named, scrolling text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: TargetId,
    pub title: String,
    pub kind: PanelKind,
    pub visible: bool,
    content: String,
}

impl Panel {
    pub fn styled(id: impl Into<TargetId>, title: impl Into<String>) -> Self {
        Self::new(id.into(), title.into(), PanelKind::Styled)
    }

    pub fn plain(id: impl Into<TargetId>, title: impl Into<String>) -> Self {
        Self::new(id.into(), title.into(), PanelKind::Plain)
    }

    fn new(id: TargetId, title: String, kind: PanelKind) -> Self {
        Self {
            id,
            title,
            kind,
            visible: true,
            content: String::new(),
        }
    }

    /// Start hidden until shown.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn runs(&self) -> Result<Vec<Segment>, SinkError> {
        match self.kind {
            PanelKind::Styled => segments(&self.content)
                .map_err(|err| SinkError::Other(format!("panel {}: {err}", self.id))),
            PanelKind::Plain => Ok(vec![Segment {
                text: self.content.clone(),
                category: None,
            }]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Areas for `visible` panels on a `cols` x `rows` terminal, in panel order.
pub fn layout(visible: usize, cols: u16, rows: u16) -> Vec<Rect> {
    let height = rows.saturating_sub(1);
    match visible {
        0 => Vec::new(),
        1 => vec![Rect {
            x: 0,
            y: 0,
            width: cols,
            height,
        }],
        n => {
            let left = cols / 2;
            let right_x = left.saturating_add(1).min(cols);
            let right_width = cols - right_x;
            let stacked = (n - 1) as u16;
            let each = height / stacked;

            let mut rects = vec![Rect {
                x: 0,
                y: 0,
                width: left,
                height,
            }];
            for i in 0..stacked {
                let y = i * each;
                let h = if i + 1 == stacked { height - y } else { each };
                rects.push(Rect {
                    x: right_x,
                    y,
                    width: right_width,
                    height: h,
                });
            }
            rects
        }
    }
}

/// One display row: text runs with their category.
pub type Line = Vec<(String, Option<Category>)>;

fn display_width(text: &str) -> usize {
    display_width_impl(text) as usize
}

/// Break runs into rows no wider than `width` columns.
///
/// Wrapping is by grapheme, so wide characters never straddle the edge.
/// Tabs become two spaces; other control characters are dropped.
pub fn wrap(runs: &[Segment], width: usize) -> Vec<Line> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines: Vec<Line> = vec![Vec::new()];
    let mut column = 0;

    for run in runs {
        for grapheme in run.text.graphemes(true) {
            if grapheme == "\n" || grapheme == "\r\n" {
                lines.push(Vec::new());
                column = 0;
                continue;
            }
            let grapheme = if grapheme == "\t" { "  " } else { grapheme };
            if grapheme.chars().all(char::is_control) {
                continue;
            }
            let w = display_width(grapheme);
            if column > 0 && column + w > width {
                lines.push(Vec::new());
                column = 0;
            }
            // lines always holds at least one row
            if let Some(line) = lines.last_mut() {
                match line.last_mut() {
                    Some((text, category)) if *category == run.category => text.push_str(grapheme),
                    _ => line.push((grapheme.to_string(), run.category)),
                }
            }
            column += w;
        }
    }
    lines
}

/// Cut `text` to at most `width` columns.
fn fit(text: &str, width: usize) -> (String, usize) {
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > width {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    (out, used)
}

/// The text between the last declaration-ending `;` and whatever opened it.
///
/// ```rust
/// use livetype::screen::last_declaration;
///
/// assert_eq!(last_declaration("a {\n  color: red;\n}"), Some("color: red"));
/// assert_eq!(last_declaration("a {"), None);
/// ```
pub fn last_declaration(stylesheet: &str) -> Option<&str> {
    let end = stylesheet.rfind(';')?;
    let start = stylesheet[..end]
        .rfind(['{', '}', ';'])
        .map_or(0, |i| i + 1);
    Some(stylesheet[start..end].trim())
}

/// What the status line shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub paused: bool,
    pub finished: bool,
    /// The sequence was skipped and everything shown at once.
    pub revealed: bool,
    pub last_declaration: String,
}

impl Status {
    /// The status line, cut to `width` columns.
    pub fn render(&self, width: usize) -> String {
        let state = if self.revealed {
            "[skipped]"
        } else if self.finished {
            "[done]"
        } else if self.paused {
            "[paused]"
        } else {
            "[typing]"
        };
        let keys = if self.finished {
            "q quit"
        } else if self.paused {
            "p resume  s skip"
        } else {
            "p pause  s skip"
        };
        let line = if self.last_declaration.is_empty() {
            format!("{state}  {keys}")
        } else {
            format!("{state}  {keys}  | {}", self.last_declaration)
        };
        fit(&line, width).0
    }
}

/// Everything on the terminal, drawn to `W`.
pub struct Screen<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    panels: Vec<Panel>,
    stylesheet: String,
    theme: Theme,
    status: Status,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            panels: Vec::new(),
            stylesheet: String::new(),
            theme: Theme::default(),
            status: Status::default(),
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn panel(&self, id: &TargetId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == *id)
    }

    fn panel_mut(&mut self, id: &TargetId) -> Result<&mut Panel, SinkError> {
        self.panels
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| SinkError::UnknownTarget(id.clone()))
    }

    /// Everything the live stylesheet has received.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn markup(&self, id: &TargetId) -> Result<String, SinkError> {
        self.panel(id)
            .map(|p| p.content.clone())
            .ok_or_else(|| SinkError::UnknownTarget(id.clone()))
    }

    pub fn set_markup(&mut self, id: &TargetId, markup: &str) -> Result<(), SinkError> {
        let panel = self.panel_mut(id)?;
        panel.content.clear();
        panel.content.push_str(markup);
        self.draw_panel(id)
    }

    pub fn append_text(&mut self, id: &TargetId, text: &str) -> Result<(), SinkError> {
        self.panel_mut(id)?.content.push_str(text);
        self.draw_panel(id)
    }

    /// Make a hidden panel visible; the layout changes, so all is redrawn.
    pub fn show(&mut self, id: &TargetId) -> Result<(), SinkError> {
        let panel = self.panel_mut(id)?;
        if panel.visible {
            return Ok(());
        }
        panel.visible = true;
        log::debug!("screen: showing panel {id}");
        self.redraw()
    }

    /// Take in complete statements and restyle everything.
    pub fn append_style(&mut self, css: &str) -> Result<(), SinkError> {
        self.stylesheet.push_str(css);
        self.theme = Theme::from_stylesheet(&self.stylesheet);
        if let Some(declaration) = last_declaration(&self.stylesheet) {
            self.status.last_declaration = declaration.split_whitespace().collect::<Vec<_>>().join(" ");
        }
        self.redraw()
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<(), SinkError> {
        self.status.paused = paused;
        self.draw_status()?;
        Ok(self.out.flush()?)
    }

    pub fn finish(&mut self, revealed: bool) -> Result<(), SinkError> {
        self.status.finished = true;
        self.status.revealed = revealed;
        self.status.paused = false;
        self.draw_status()?;
        Ok(self.out.flush()?)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SinkError> {
        self.cols = cols;
        self.rows = rows;
        self.redraw()
    }

    /// Clear and draw every visible panel and the status line.
    pub fn redraw(&mut self) -> Result<(), SinkError> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        let visible: Vec<TargetId> = self
            .panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.clone())
            .collect();
        let rects = layout(visible.len(), self.cols, self.rows);
        for (id, rect) in visible.iter().zip(rects) {
            self.draw_panel_in(id, rect)?;
        }
        self.draw_status()?;
        Ok(self.out.flush()?)
    }

    fn draw_panel(&mut self, id: &TargetId) -> Result<(), SinkError> {
        let visible: Vec<&TargetId> = self
            .panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| &p.id)
            .collect();
        let Some(index) = visible.iter().position(|v| *v == id) else {
            return Ok(());
        };
        let rects = layout(visible.len(), self.cols, self.rows);
        let rect = rects[index];
        self.draw_panel_in(id, rect)?;
        Ok(self.out.flush()?)
    }

    fn draw_panel_in(&mut self, id: &TargetId, rect: Rect) -> Result<(), SinkError> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        let Some(panel) = self.panel(id) else {
            return Ok(());
        };
        let width = rect.width as usize;
        let body_rows = rect.height.saturating_sub(1) as usize;
        let runs = panel.runs()?;
        let lines = wrap(&runs, width);
        let start = lines.len().saturating_sub(body_rows);
        let title = panel.title.clone();

        let frame = self.theme.panel(id.as_str());
        let border = Paint {
            fg: frame.border.or(frame.fg),
            ..frame
        };
        let (head, used) = fit(&format!("── {title} "), width);
        queue!(self.out, MoveTo(rect.x, rect.y))?;
        paint(&mut self.out, border)?;
        queue!(self.out, Print(head), Print("─".repeat(width - used)))?;

        for row in 0..body_rows {
            let y = rect.y + 1 + row as u16;
            queue!(self.out, MoveTo(rect.x, y))?;
            let mut used = 0;
            if let Some(line) = lines.get(start + row) {
                for (text, category) in line {
                    paint(&mut self.out, self.theme.token(id.as_str(), *category))?;
                    queue!(self.out, Print(text))?;
                    used += display_width(text);
                }
            }
            paint(&mut self.out, frame)?;
            queue!(self.out, Print(" ".repeat(width.saturating_sub(used))))?;
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn draw_status(&mut self) -> Result<(), SinkError> {
        if self.rows == 0 {
            return Ok(());
        }
        let width = self.cols as usize;
        let line = self.status.render(width);
        let used = display_width(&line);
        queue!(
            self.out,
            MoveTo(0, self.rows - 1),
            ResetColor,
            SetAttribute(Attribute::Reset),
            SetAttribute(Attribute::Reverse),
            Print(line),
            Print(" ".repeat(width.saturating_sub(used))),
            SetAttribute(Attribute::Reset)
        )?;
        Ok(())
    }
}

fn paint<W: Write>(out: &mut W, paint: Paint) -> std::io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = paint.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = paint.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if paint.bold == Some(true) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, category: Option<Category>) -> Segment {
        Segment {
            text: text.to_string(),
            category,
        }
    }

    fn screen() -> Screen<Vec<u8>> {
        Screen::new(Vec::new(), 40, 12)
            .with_panel(Panel::styled("style", "style.css"))
            .with_panel(Panel::plain("work", "notes"))
            .with_panel(Panel::plain("key", "key").hidden())
    }

    #[test]
    fn test_layout_single_panel_fills_screen() {
        assert_eq!(
            layout(1, 80, 24),
            vec![Rect {
                x: 0,
                y: 0,
                width: 80,
                height: 23
            }]
        );
        assert!(layout(0, 80, 24).is_empty());
    }

    #[test]
    fn test_layout_stacks_right_column() {
        let rects = layout(3, 81, 25);
        assert_eq!(rects[0].width, 40);
        assert_eq!((rects[1].x, rects[1].y, rects[1].height), (41, 0, 12));
        assert_eq!((rects[2].x, rects[2].y, rects[2].height), (41, 12, 12));
        assert_eq!(rects[1].width, 40);
    }

    #[test]
    fn test_layout_tiny_terminal() {
        let rects = layout(3, 1, 1);
        assert!(rects.iter().all(|r| r.height == 0));
    }

    #[test]
    fn test_wrap_breaks_on_width_and_newlines() {
        let lines = wrap(&[seg("abcdef\ngh", None)], 4);
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.iter().map(|(t, _)| t.as_str()).collect())
            .collect();
        assert_eq!(text, vec!["abcd", "ef", "gh"]);
    }

    #[test]
    fn test_wrap_keeps_categories_and_merges_runs() {
        let lines = wrap(
            &[
                seg("a", Some(Category::Selector)),
                seg("b", Some(Category::Selector)),
                seg("{", None),
            ],
            10,
        );
        assert_eq!(
            lines,
            vec![vec![
                ("ab".to_string(), Some(Category::Selector)),
                ("{".to_string(), None)
            ]]
        );
    }

    #[test]
    fn test_wrap_wide_graphemes() {
        let lines = wrap(&[seg("日本語", None)], 5);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].0, "日本");
    }

    #[test]
    fn test_wrap_tabs_and_controls() {
        let lines = wrap(&[seg("a\tb\u{7}", None)], 10);
        assert_eq!(lines, vec![vec![("a  b".to_string(), None)]]);
    }

    #[test]
    fn test_last_declaration() {
        assert_eq!(last_declaration("a{b:c;d:e;"), Some("d:e"));
        assert_eq!(last_declaration("a{b:c;}\n\nq{x:y;"), Some("x:y"));
        assert_eq!(last_declaration(""), None);
    }

    #[test]
    fn test_status_line() {
        let mut status = Status {
            last_declaration: "color: red".to_string(),
            ..Status::default()
        };
        insta::assert_snapshot!(status.render(80), @"[typing]  p pause  s skip  | color: red");
        status.paused = true;
        insta::assert_snapshot!(status.render(80), @"[paused]  p resume  s skip  | color: red");
        status.finished = true;
        status.revealed = true;
        assert_eq!(status.render(9), "[skipped]");
    }

    #[test]
    fn test_writes_reach_panels() {
        let mut screen = screen();
        let work = TargetId::from("work");
        screen.append_text(&work, "Hello").unwrap();
        screen.append_text(&work, ", world").unwrap();
        assert_eq!(screen.markup(&work).unwrap(), "Hello, world");

        let style = TargetId::from("style");
        screen
            .set_markup(&style, "<span class=\"selector\">a</span>{")
            .unwrap();
        assert_eq!(screen.markup(&style).unwrap(), "<span class=\"selector\">a</span>{");
    }

    #[test]
    fn test_unknown_panel_is_an_error() {
        let mut screen = screen();
        let err = screen.append_text(&TargetId::from("nope"), "x").unwrap_err();
        assert!(matches!(err, SinkError::UnknownTarget(id) if id.as_str() == "nope"));
    }

    #[test]
    fn test_bad_markup_is_an_error() {
        let mut screen = screen();
        let style = TargetId::from("style");
        assert!(screen.set_markup(&style, "</span>").is_err());
    }

    #[test]
    fn test_hidden_panel_is_written_but_not_drawn() {
        let mut screen = screen();
        let key = TargetId::from("key");
        screen.append_text(&key, "secret").unwrap();
        assert!(!screen.panel(&key).unwrap().visible);

        screen.show(&key).unwrap();
        assert!(screen.panel(&key).unwrap().visible);
        assert_eq!(screen.markup(&key).unwrap(), "secret");
    }

    #[test]
    fn test_style_restyles_and_updates_status() {
        let mut screen = screen();
        screen.append_style("#work {\n  color:   red;").unwrap();
        assert_eq!(screen.stylesheet(), "#work {\n  color:   red;");
        assert_eq!(screen.status().last_declaration, "color: red");
        assert!(screen.theme().panel("work").fg.is_some());
    }

    #[test]
    fn test_finish_clears_pause() {
        let mut screen = screen();
        screen.set_paused(true).unwrap();
        screen.finish(true).unwrap();
        assert_eq!(
            screen.status(),
            &Status {
                paused: false,
                finished: true,
                revealed: true,
                last_declaration: String::new(),
            }
        );
    }

    #[test]
    fn test_drawing_emits_output() {
        let mut screen = screen();
        screen.append_text(&TargetId::from("work"), "visible text").unwrap();
        screen.redraw().unwrap();
        let drawn = String::from_utf8_lossy(&screen.out);
        assert!(drawn.contains("visible text"));
        assert!(drawn.contains("── notes "));
    }
}
