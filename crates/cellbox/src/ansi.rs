//! ANSI escape output for terminals.
//!
//! Styles are emitted with `crossterm` commands, only when they change from
//! one segment to the next. Each line ends with a full reset so the output
//! can be printed line by line.

use std::io::Write;

use cellcss::types::RgbaColor;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::error::Result;
use crate::output::RenderOutput;
use crate::segment::Style;
use crate::strip::Strip;

/// Renders the composited output as text with ANSI escapes.
///
/// ```
/// use cellbox::{ansi::to_ansi_string, RenderConfig};
///
/// let mut doc = cellbox::markup::parse_markup("<b>hi</b>").unwrap();
/// let output = doc.render(&RenderConfig::default().with_viewport(10, 5));
/// let ansi = to_ansi_string(&output).unwrap();
/// assert!(ansi.contains("hi"));
/// assert!(ansi.contains("\u{1b}[1m"));
/// ```
pub fn to_ansi_string(output: &RenderOutput) -> Result<String> {
    let lines = output.composite();
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\n")?;
        }
        write_line(&mut out, line)?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Writes one line, ending with an attribute reset.
pub fn write_line<W: Write>(out: &mut W, line: &Strip) -> Result<()> {
    let mut last = Style::default();
    for segment in line.segments() {
        let style = segment.style().copied().unwrap_or_default();
        emit_style(out, &style, &mut last)?;
        queue!(out, Print(segment.text()))?;
    }
    if !last.is_empty() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn emit_style<W: Write>(out: &mut W, style: &Style, last: &mut Style) -> Result<()> {
    if style == last {
        return Ok(());
    }
    let flags_changed = Style { fg: None, bg: None, ..*style } != Style { fg: None, bg: None, ..*last };
    if flags_changed {
        queue!(out, SetAttribute(Attribute::Reset))?;
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.dim, Attribute::Dim),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.overline, Attribute::OverLined),
            (style.strike, Attribute::CrossedOut),
            (style.blink, Attribute::SlowBlink),
            (style.reverse, Attribute::Reverse),
            (style.hidden, Attribute::Hidden),
        ];
        for (on, attribute) in attributes {
            if on {
                queue!(out, SetAttribute(attribute))?;
            }
        }
        // A reset clears colours too.
        *last = Style {
            fg: None,
            bg: None,
            ..*style
        };
    }
    if style.fg != last.fg {
        queue!(out, SetForegroundColor(style.fg.map_or(Color::Reset, to_crossterm_color)))?;
    }
    if style.bg != last.bg {
        queue!(out, SetBackgroundColor(style.bg.map_or(Color::Reset, to_crossterm_color)))?;
    }
    *last = *style;
    Ok(())
}

/// Terminal colours have no alpha, so translucent colours are blended onto
/// black.
fn to_crossterm_color(c: RgbaColor) -> Color {
    if let Some(index) = c.ansi {
        return Color::AnsiValue(index);
    }
    let alpha = c.a.clamp(0.0, 1.0);
    let scale = |v: u8| (v as f32 * alpha).round() as u8;
    Color::Rgb {
        r: scale(c.r),
        g: scale(c.g),
        b: scale(c.b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    fn ansi(line: Strip) -> String {
        let mut out = Vec::new();
        write_line(&mut out, &line).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_line_has_no_escapes() {
        assert_eq!(ansi(Strip::plain("hello")), "hello");
    }

    #[test]
    fn test_styles_are_emitted_on_change_only() {
        let red = Style::with_fg(RgbaColor::rgb(255, 0, 0));
        let line = Strip::from_segments(vec![
            Segment::styled("a", red),
            Segment::styled("b", red),
            Segment::new("c"),
        ]);
        let out = ansi(line);
        assert_eq!(out.matches("\u{1b}[38;2;255;0;0m").count(), 1);
        assert!(out.contains("ab"));
        assert!(out.ends_with("c"));
    }

    #[test]
    fn test_attributes_reset_at_line_end() {
        let bold = Style {
            bold: true,
            ..Style::default()
        };
        let out = ansi(Strip::from_segment(Segment::styled("x", bold)));
        assert!(out.starts_with("\u{1b}[0m\u{1b}[1m"));
        assert!(out.ends_with("x\u{1b}[0m"));
    }

    #[test]
    fn test_translucent_colours_blend_to_black() {
        let c = RgbaColor::rgb(200, 100, 0).with_alpha(0.5);
        assert_eq!(to_crossterm_color(c), Color::Rgb { r: 100, g: 50, b: 0 });
    }
}
