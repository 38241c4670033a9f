//! Word splitting, measurement caching, line wrapping and alignment.
//!
//! Measurement itself is delegated to a host-supplied [`MeasureFn`] (a font
//! metrics backend); this module only decides where lines break and where
//! they sit inside their bounding box.

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::math::{BoundingBox, Dimensions};

/// Signature of the host-supplied measurement function. Must be pure and
/// deterministic for a given `(text, config)` pair.
pub type MeasureFn = dyn Fn(&str, &TextConfig) -> Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum WrapMode {
    /// Wraps on whitespace, never breaking words.
    #[default]
    Words,
    /// Only wraps on newline characters, ignoring width.
    Newline,
}

impl WrapMode {
    /// Parses a wrap-mode keyword, falling back to `Words` on anything unknown.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "words" | "word" => Self::Words,
            "newline" | "newlines" => Self::Newline,
            other => {
                log::warn!("unknown wrap mode keyword {other:?}, defaulting to words");
                Self::Words
            }
        }
    }
}

/// Horizontal placement of wrapped lines inside the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    /// Parses an alignment keyword, falling back to `Left` on anything unknown.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            other => {
                log::warn!("unknown text alignment keyword {other:?}, defaulting to left");
                Self::Left
            }
        }
    }
}

/// Configuration settings for rendering text elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    /// The color of the text.
    pub color: Color,
    /// Trellis does not manage fonts. It is up to the host to assign a
    /// unique ID to each font and provide it here.
    pub font_id: u16,
    /// The font size of the text.
    pub font_size: u16,
    /// The spacing between letters.
    pub letter_spacing: u16,
    /// The height of each line of text. `0` uses the measured height.
    pub line_height: u16,
    /// Defines the text wrapping behavior.
    pub wrap_mode: WrapMode,
    /// The alignment of the text.
    pub alignment: TextAlignment,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.0, 0.0, 0.0),
            font_id: 0,
            font_size: 16,
            letter_spacing: 0,
            line_height: 0,
            wrap_mode: WrapMode::Words,
            alignment: TextAlignment::Left,
        }
    }
}

/// A single token produced by [`split_into_words`]: a word, a whitespace
/// run, or a newline. Widths are filled in by [`measure`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word {
    pub text: String,
    pub width: f32,
    pub is_whitespace: bool,
    pub is_newline: bool,
}

/// Splits text into alternating word/whitespace/newline tokens.
/// Consecutive spaces group into one whitespace token; each newline
/// character is its own token. Empty text yields no tokens.
pub fn split_into_words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut current_is_whitespace = false;

    let mut flush = |buf: &mut String, is_whitespace: bool, words: &mut Vec<Word>| {
        if !buf.is_empty() {
            words.push(Word {
                text: std::mem::take(buf),
                width: 0.0,
                is_whitespace,
                is_newline: false,
            });
        }
    };

    for ch in text.chars() {
        if ch == '\n' {
            flush(&mut current, current_is_whitespace, &mut words);
            words.push(Word {
                text: "\n".to_string(),
                width: 0.0,
                is_whitespace: false,
                is_newline: true,
            });
        } else if ch.is_whitespace() {
            if !current_is_whitespace {
                flush(&mut current, current_is_whitespace, &mut words);
                current_is_whitespace = true;
            }
            current.push(ch);
        } else {
            if current_is_whitespace {
                flush(&mut current, current_is_whitespace, &mut words);
                current_is_whitespace = false;
            }
            current.push(ch);
        }
    }
    flush(&mut current, current_is_whitespace, &mut words);
    words
}

/// Pre-measurement results for one piece of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextMeasurement {
    /// Size of the text laid out on a single line (per explicit-newline
    /// segment, the widest one wins).
    pub unwrapped_dimensions: Dimensions,
    /// Width of the longest unbreakable word.
    pub min_width: f32,
    pub words: Vec<Word>,
    pub contains_newlines: bool,
}

/// Measures each token via the injected measurement function and aggregates
/// unwrapped dimensions, minimum width and newline presence.
pub fn measure(text: &str, config: &TextConfig, measure_fn: &MeasureFn) -> TextMeasurement {
    let mut words = split_into_words(text);
    let mut line_width: f32 = 0.0;
    let mut max_line_width: f32 = 0.0;
    let mut min_width: f32 = 0.0;
    let mut height: f32 = 0.0;
    let mut contains_newlines = false;

    for word in &mut words {
        if word.is_newline {
            contains_newlines = true;
            max_line_width = max_line_width.max(line_width);
            line_width = 0.0;
            continue;
        }
        let dimensions = measure_fn(&word.text, config);
        word.width = dimensions.width;
        line_width += dimensions.width;
        height = height.max(dimensions.height);
        if !word.is_whitespace {
            min_width = min_width.max(dimensions.width);
        }
    }
    max_line_width = max_line_width.max(line_width);

    TextMeasurement {
        unwrapped_dimensions: Dimensions::new(max_line_width, height),
        min_width,
        words,
        contains_newlines,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    font_size: u16,
    letter_spacing: u16,
}

/// Measurement cache keyed by `(text, font_size, letter_spacing)`.
///
/// May persist across frames; the host must reset it when fonts or
/// measurement behavior change.
#[derive(Default)]
pub struct TextMeasurementCache {
    entries: FxHashMap<CacheKey, TextMeasurement>,
}

impl TextMeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure_cached(
        &mut self,
        text: &str,
        config: &TextConfig,
        measure_fn: &MeasureFn,
    ) -> TextMeasurement {
        let key = CacheKey {
            text: text.to_string(),
            font_size: config.font_size,
            letter_spacing: config.letter_spacing,
        };
        if let Some(cached) = self.entries.get(&key) {
            return cached.clone();
        }
        let measurement = measure(text, config, measure_fn);
        self.entries.insert(key, measurement.clone());
        measurement
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One wrapped line of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// A wrapped line placed at an absolute position by [`align_lines`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionedLine {
    pub text: String,
    pub bounding_box: BoundingBox,
}

/// Wraps measured tokens into lines of at most `available_width`.
///
/// In [`WrapMode::Words`], words accumulate greedily; a token that would
/// overflow starts a new line, leading whitespace on a new line is dropped,
/// and an explicit newline always breaks. A single word wider than
/// `available_width` is placed alone on its own line and allowed to
/// overflow rather than being split. In [`WrapMode::Newline`], breaks occur
/// only at newline tokens.
pub fn wrap(words: &[Word], available_width: f32, line_height: f32, mode: WrapMode) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<&Word> = Vec::new();
    let mut current_width: f32 = 0.0;

    let flush = |tokens: &mut Vec<&Word>, width: &mut f32, lines: &mut Vec<Line>| {
        // Trailing whitespace never counts against the line.
        while let Some(last) = tokens.last() {
            if !last.is_whitespace {
                break;
            }
            *width -= last.width;
            tokens.pop();
        }
        let text: String = tokens.iter().map(|w| w.text.as_str()).collect();
        lines.push(Line {
            text,
            width: f32::max(*width, 0.0),
            height: line_height,
        });
        tokens.clear();
        *width = 0.0;
    };

    for word in words {
        if word.is_newline {
            flush(&mut current, &mut current_width, &mut lines);
            continue;
        }
        if mode == WrapMode::Newline {
            current.push(word);
            current_width += word.width;
            continue;
        }
        if word.is_whitespace && current.is_empty() {
            // Leading whitespace on a new line is dropped.
            if lines.is_empty() {
                current.push(word);
                current_width += word.width;
            }
            continue;
        }
        if !current.is_empty() && current_width + word.width > available_width {
            flush(&mut current, &mut current_width, &mut lines);
            if word.is_whitespace {
                continue;
            }
        }
        current.push(word);
        current_width += word.width;
    }
    if !current.is_empty() {
        flush(&mut current, &mut current_width, &mut lines);
    }
    lines
}

/// Anchors each line inside `bounding_box` according to `alignment` and
/// stacks lines downward from the box's top edge.
pub fn align_lines(
    lines: &[Line],
    bounding_box: BoundingBox,
    alignment: TextAlignment,
) -> Vec<PositionedLine> {
    let mut positioned = Vec::with_capacity(lines.len());
    let mut y = bounding_box.y;
    for line in lines {
        let x = match alignment {
            TextAlignment::Left => bounding_box.x,
            TextAlignment::Center => bounding_box.x + (bounding_box.width - line.width) / 2.0,
            TextAlignment::Right => bounding_box.x + bounding_box.width - line.width,
        };
        positioned.push(PositionedLine {
            text: line.text.clone(),
            bounding_box: BoundingBox::new(x, y, line.width, line.height),
        });
        y += line.height;
    }
    positioned
}
