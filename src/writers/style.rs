//! Styles of the pretty renderer

use colored::{Color, Colorize};
use std::fmt::Write as _;

/// Color, weight and minimum width of one output segment.
///
/// Text is padded to `width` before it is colored, so turning color off
/// never changes the layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub width: usize,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            color: None,
            bold: false,
            width: 0,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub(crate) fn paint(&self, out: &mut String, text: &str, use_color: bool) {
        self.paint_as(out, text, self.color, use_color);
    }

    /// Like `paint`, with `color` standing in for the style's own color.
    pub(crate) fn paint_as(
        &self,
        out: &mut String,
        text: &str,
        color: Option<Color>,
        use_color: bool,
    ) {
        let padding = self.width.saturating_sub(text.chars().count());

        if !use_color || (color.is_none() && !self.bold) {
            out.push_str(text);
            push_spaces(out, padding);
            return;
        }

        let mut padded = String::with_capacity(text.len() + padding);
        padded.push_str(text);
        push_spaces(&mut padded, padding);

        let mut styled = padded.normal();
        if let Some(color) = color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        let _ = write!(out, "{}", styled);
    }
}

pub(crate) fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

/// Styles of every segment the pretty renderer writes.
///
/// `level.color` left at `None` colors each level with its own color.
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyStyles {
    pub timestamp: Style,
    pub level: Style,
    pub caller: Style,
    pub tag: Style,
    pub message: Style,
    pub field_key: Style,
    pub field_value: Style,
    pub error_key: Style,
    pub error_value: Style,
    pub block_border: Style,
    /// Left margin of list and map blocks
    pub block_indent: usize,
    pub border: char,
}

impl Default for PrettyStyles {
    fn default() -> Self {
        Self {
            timestamp: Style::new().color(Color::BrightBlack),
            level: Style::new().width(5),
            caller: Style::new().color(Color::BrightBlack).width(18),
            tag: Style::new().color(Color::BrightCyan).bold().width(10),
            message: Style::new(),
            field_key: Style::new().color(Color::BrightBlack),
            field_value: Style::new(),
            error_key: Style::new().color(Color::BrightBlack),
            error_value: Style::new().color(Color::Red),
            block_border: Style::new().color(Color::BrightBlack),
            block_indent: 5,
            border: '│',
        }
    }
}
