//! Human-like typing cadence.
//!
//! The delay after each step depends only on the last three characters
//! written, never on the accumulated text:
//!
//! | Pause       | Window shape                       | Default factor |
//! |-------------|------------------------------------|----------------|
//! | `Sentence`  | `.`, `?` or `!` then whitespace    | 70             |
//! | `Paragraph` | blank line not preceded by `/`     | 50             |
//! | `Comma`     | non-digit, `,`, whitespace         | 30             |
//! | `Base`      | anything else                      | 1              |

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Pause category chosen from the lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Sentence,
    Paragraph,
    Comma,
    Base,
}

/// Timing for a typing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Delay between ordinary steps.
    pub base_interval: Duration,
    /// Grapheme clusters written per step. Never zero.
    pub chunk_size: usize,
    pub sentence_factor: u32,
    pub paragraph_factor: u32,
    pub comma_factor: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(16),
            chunk_size: 1,
            sentence_factor: 70,
            paragraph_factor: 50,
            comma_factor: 30,
        }
    }
}

impl PacingConfig {
    pub fn with_interval(mut self, base_interval: Duration) -> Self {
        self.base_interval = base_interval;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_factors(mut self, sentence: u32, paragraph: u32, comma: u32) -> Self {
        self.sentence_factor = sentence;
        self.paragraph_factor = paragraph;
        self.comma_factor = comma;
        self
    }

    /// Delay to wait after a step that ended in `pause`.
    pub fn delay_for(&self, pause: Pause) -> Duration {
        let factor = match pause {
            Pause::Sentence => self.sentence_factor,
            Pause::Paragraph => self.paragraph_factor,
            Pause::Comma => self.comma_factor,
            Pause::Base => 1,
        };
        self.base_interval * factor
    }

    /// How often a paused run re-checks its flags.
    pub(crate) fn poll_interval(&self) -> Duration {
        self.base_interval.max(Duration::from_millis(1))
    }

    /// Byte offset where the step starting at `cursor` ends.
    pub(crate) fn chunk_end(&self, source: &str, cursor: usize) -> usize {
        source[cursor..]
            .grapheme_indices(true)
            .nth(self.chunk_size.max(1))
            .map_or(source.len(), |(offset, _)| cursor + offset)
    }
}

/// The last three characters written, oldest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lookback {
    window: [Option<char>; 3],
}

impl Lookback {
    pub fn push(&mut self, ch: char) {
        self.window.rotate_left(1);
        self.window[2] = Some(ch);
    }

    /// Push the tail of a freshly written chunk.
    pub fn extend(&mut self, chunk: &str) {
        let mut tail: Vec<char> = chunk.chars().rev().take(3).collect();
        tail.reverse();
        for ch in tail {
            self.push(ch);
        }
    }

    pub fn pause(&self) -> Pause {
        match self.window {
            [_, Some('.' | '?' | '!'), Some(w)] if w.is_whitespace() => Pause::Sentence,
            [Some(p), Some('\n'), Some('\n')] if p != '/' => Pause::Paragraph,
            [Some(d), Some(','), Some(w)] if !d.is_ascii_digit() && w.is_whitespace() => {
                Pause::Comma
            }
            _ => Pause::Base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pause_after(text: &str) -> Pause {
        let mut lookback = Lookback::default();
        lookback.extend(text);
        lookback.pause()
    }

    #[test]
    fn test_sentence_end() {
        assert_eq!(pause_after("Hi. "), Pause::Sentence);
        assert_eq!(pause_after("Why?\n"), Pause::Sentence);
        assert_eq!(pause_after("Yes!\t"), Pause::Sentence);
        assert_eq!(pause_after("3.5"), Pause::Base);
    }

    #[test]
    fn test_paragraph_end() {
        assert_eq!(pause_after("end\n\n"), Pause::Paragraph);
        assert_eq!(pause_after("*/\n\n"), Pause::Base);
        assert_eq!(pause_after("\n\n"), Pause::Base);
    }

    #[test]
    fn test_comma() {
        assert_eq!(pause_after("one, "), Pause::Comma);
        assert_eq!(pause_after("1, "), Pause::Base);
        assert_eq!(pause_after("a,b"), Pause::Base);
    }

    #[test]
    fn test_window_shape_decides_category() {
        assert_eq!(pause_after(".\n\n"), Pause::Paragraph);
        assert_eq!(pause_after("x.\n"), Pause::Sentence);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut lookback = Lookback::default();
        lookback.extend("Hi. ");
        lookback.push('a');
        assert_eq!(lookback.pause(), Pause::Base);
    }

    #[test]
    fn test_delays() {
        let pacing = PacingConfig::default().with_interval(Duration::from_millis(10));
        assert_eq!(pacing.delay_for(Pause::Base), Duration::from_millis(10));
        assert_eq!(pacing.delay_for(Pause::Comma), Duration::from_millis(300));
        assert_eq!(pacing.delay_for(Pause::Paragraph), Duration::from_millis(500));
        assert_eq!(pacing.delay_for(Pause::Sentence), Duration::from_millis(700));
    }

    #[test]
    fn test_chunks_follow_graphemes() {
        let pacing = PacingConfig::default().with_chunk_size(2);
        let source = "ae\u{301}bc";
        assert_eq!(pacing.chunk_end(source, 0), "ae\u{301}".len());
        assert_eq!(pacing.chunk_end(source, "ae\u{301}".len()), source.len());
    }

    #[test]
    fn test_zero_chunk_is_clamped() {
        let pacing = PacingConfig::default().with_chunk_size(0);
        assert_eq!(pacing.chunk_size, 1);
    }
}
