//! Static font-metric tables for the two Helvetica weights the agreement uses.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Type 1 AFM widths divided by 1000. They drive line-wrap estimates
//! only; glyph placement belongs to the rendering backend.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Layout units are millimetres; one typographic point is 1/72 inch.
pub const UNITS_PER_POINT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font family and text style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Helvetica,
    HelveticaBold,
}

/// Typographic role of a piece of text. Fixes weight and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Letterhead,
    Title,
    Heading,
    Label,
    Body,
    Signature,
    Footer,
}

impl TextStyle {
    pub fn font(self) -> FontFamily {
        match self {
            TextStyle::Letterhead | TextStyle::Title | TextStyle::Heading | TextStyle::Label => {
                FontFamily::HelveticaBold
            }
            TextStyle::Body | TextStyle::Signature | TextStyle::Footer => FontFamily::Helvetica,
        }
    }

    pub fn font_size_pt(self) -> f32 {
        match self {
            TextStyle::Letterhead | TextStyle::Title => 16.0,
            TextStyle::Heading => 12.0,
            TextStyle::Label | TextStyle::Body => 11.0,
            TextStyle::Signature => 10.0,
            TextStyle::Footer => 8.0,
        }
    }

    /// Size of one em in layout units.
    pub fn em_units(self) -> f32 {
        self.font_size_pt() * UNITS_PER_POINT
    }

    /// Measures `s` in layout units at this style's size.
    pub fn measure(self, s: &str) -> f32 {
        get_metrics(self.font()).measure_str(s) * self.em_units()
    }

    /// Word-wraps `text` to `max_width` layout units.
    pub fn wrap(self, text: &str, max_width: f32) -> Vec<String> {
        get_metrics(self.font()).wrap(text, max_width / self.em_units())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Greedy word-wrap at `max_width_em`. Returns the printed lines.
    ///
    /// Explicit `\n` always starts a new line, and a trailing `\n` yields an
    /// empty final line. Runs of spaces collapse to one. A word wider than the
    /// line is broken at character boundaries so nothing is ever dropped.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, max_width_em, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width: f32, lines: &mut Vec<String>) {
        // Leading indentation is significant in clause lists ("   - meals").
        let indent = paragraph.len() - paragraph.trim_start_matches(' ').len();
        let mut current = " ".repeat(indent);
        let mut current_width = indent as f32 * self.space_width;
        let mut has_word = false;

        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word);
            let space_w = if has_word { self.space_width } else { 0.0 };

            if current_width + space_w + word_w <= max_width {
                if has_word {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                has_word = true;
                continue;
            }

            if has_word {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if current_width + word_w <= max_width {
                current.push_str(word);
                current_width += word_w;
            } else {
                // Hard-break the oversized word; its tail stays on the open line.
                let mut line_has_glyph = has_word && current_width > 0.0;
                for c in word.chars() {
                    let c_w = self.char_width(c);
                    if line_has_glyph && current_width + c_w > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += c_w;
                    line_has_glyph = true;
                }
            }
            has_word = true;
        }

        lines.push(current);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica (regular and oblique share widths).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica-Bold.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Helvetica);
        // "Rome" = R(0.722) + o(0.556) + m(0.833) + e(0.556) = 2.667
        let width = metrics.measure_str("Rome");
        assert!(
            (width - 2.667).abs() < 1e-3,
            "Rome width should be ~2.667, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let width = metrics.measure_str("§");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Represented by";
        assert!(TextStyle::Label.measure(text) > TextStyle::Body.measure(text));
    }

    #[test]
    fn test_style_measure_scales_with_size() {
        let body = TextStyle::Body.measure("Page 1");
        let footer = TextStyle::Footer.measure("Page 1");
        assert!(footer < body);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = TextStyle::Body.wrap("Italy", 110.0);
        assert_eq!(lines, vec!["Italy".to_string()]);
    }

    #[test]
    fn test_wrap_empty_text_is_one_blank_line() {
        assert_eq!(TextStyle::Body.wrap("", 170.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_honours_newlines_and_trailing_newline() {
        let lines = TextStyle::Body.wrap("1. First\n2. Second\n", 170.0);
        assert_eq!(lines, vec!["1. First", "2. Second", ""]);
    }

    #[test]
    fn test_wrap_keeps_list_indent() {
        let lines = TextStyle::Body.wrap("2. Includes:\n   - meals", 170.0);
        assert_eq!(lines[1], "   - meals");
    }

    #[test]
    fn test_wrap_long_text_keeps_every_word() {
        let text = "word ".repeat(200);
        let lines = TextStyle::Body.wrap(text.trim_end(), 110.0);
        assert!(lines.len() > 1);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), 200);
        for line in &lines {
            assert!(
                TextStyle::Body.measure(line) <= 110.0 + 1e-3,
                "line overflows: {line}"
            );
        }
    }

    #[test]
    fn test_wrap_breaks_oversized_word() {
        let word = "x".repeat(400);
        let lines = TextStyle::Body.wrap(&word, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
