//! Raw-mode terminal with line-based drawing.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthChar;

/// Text attributes for a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl SpanStyle {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// A run of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One screen line.
pub type Line = Vec<Span>;

/// Plain text of a line, for tests and logging.
pub fn line_text(line: &Line) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

/// Truncates or pads `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Right-aligned variant of [`fit`].
pub fn fit_right(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let trimmed = fitted.trim_end();
    let used: usize = trimmed.chars().map(|c| c.width().unwrap_or(0)).sum();
    format!("{}{}", " ".repeat(width - used), trimmed)
}

/// Owns the terminal for the lifetime of the dashboard.
///
/// Raw mode and the alternate screen are restored on drop, also when
/// unwinding from an error.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draws `lines[offset..]` over the whole screen.
    pub fn draw(&mut self, lines: &[Line], offset: usize) -> io::Result<()> {
        let (width, height) = self.size()?;
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        for (y, line) in lines.iter().skip(offset).take(height as usize).enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            let mut remaining = width as usize;
            for span in line {
                if remaining == 0 {
                    break;
                }
                let text = fit(&span.text, remaining.min(span_width(&span.text)));
                remaining -= span_width(&text);
                self.write_span(&text, span.style)?;
            }
        }

        self.stdout.flush()
    }

    fn write_span(&mut self, text: &str, style: SpanStyle) -> io::Result<()> {
        if let Some(color) = style.fg {
            queue!(self.stdout, SetForegroundColor(color))?;
        }
        if style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            self.stdout,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }
}

fn span_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn test_fit_counts_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(fit("日本語", 5), "日本 ");
    }

    #[test]
    fn test_fit_right() {
        assert_eq!(fit_right("42", 5), "   42");
        assert_eq!(fit_right("123456", 3), "123");
    }
}
