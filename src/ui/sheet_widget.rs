//! Custom Ratatui widget that renders the bottom sheet: a grab-handle row on
//! top and scrollable body text underneath.  The sheet overlays the page, so
//! the area is cleared before drawing.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the sheet widget (body scroll offset).
#[derive(Debug, Default)]
pub struct SheetWidgetState {
    /// First visible body line.
    pub scroll: usize,
}

impl SheetWidgetState {
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, max: usize) {
        self.scroll = (self.scroll + 1).min(max);
    }
}

/// How many rows the body text occupies when word-wrapped to `width`
/// columns, including one blank separator row between paragraphs.
/// Mirrors ratatui's greedy word wrapping closely enough to bound scrolling.
pub fn body_line_count(paragraphs: &[String], width: u16) -> usize {
    if width == 0 {
        return 0;
    }
    let width = width as usize;

    let mut lines = 0;
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            lines += 1; // separator
        }
        let mut used = 0;
        let mut para_lines = 1;
        for word in para.split_whitespace() {
            let len = word.chars().count();
            if used == 0 {
                used = len.min(width);
                para_lines += len.saturating_sub(1) / width;
            } else if used + 1 + len <= width {
                used += 1 + len;
            } else {
                para_lines += 1 + len.saturating_sub(1) / width;
                used = len.min(width);
            }
        }
        if para.split_whitespace().next().is_none() {
            para_lines = 1;
        }
        lines += para_lines;
    }
    lines
}

// ───────────────────────────────────────── widget ────────────

/// The sheet itself — created fresh each frame.
pub struct SheetWidget<'a> {
    paragraphs: &'a [String],
    grabbed: bool,
}

impl<'a> SheetWidget<'a> {
    pub fn new(paragraphs: &'a [String]) -> Self {
        Self {
            paragraphs,
            grabbed: false,
        }
    }

    /// Highlight the handle while the pointer is holding it.
    pub fn grabbed(mut self, grabbed: bool) -> Self {
        self.grabbed = grabbed;
        self
    }

    /// Columns available to the body text inside the horizontal padding.
    pub fn body_width(area: Rect) -> u16 {
        area.width.saturating_sub(4)
    }

    /// Body rows visible at the sheet's current height.
    pub fn body_height(area: Rect) -> u16 {
        area.height.saturating_sub(2)
    }
}

impl StatefulWidget for SheetWidget<'_> {
    type State = SheetWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        Clear.render(area, buf);

        // ── handle row ─────────────────────────────────────────
        let handle_area = Rect { height: 1, ..area };
        let style = if self.grabbed {
            Theme::handle_grabbed_style()
        } else {
            Theme::handle_style()
        };
        buf.set_style(handle_area, style);

        let grip = "────────";
        Paragraph::new(Line::from(Span::raw(grip)))
            .alignment(Alignment::Center)
            .style(style)
            .render(handle_area, buf);

        // ── body ───────────────────────────────────────────────
        if area.height < 2 {
            return;
        }
        let body_area = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: Self::body_width(area),
            height: Self::body_height(area).max(1),
        };
        if body_area.width == 0 {
            return;
        }

        let visible = body_area.height as usize;
        let total = body_line_count(self.paragraphs, body_area.width);
        state.scroll = state.scroll.min(total.saturating_sub(visible));

        let mut lines: Vec<Line> = Vec::new();
        for (i, para) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                para.as_str(),
                Theme::sheet_body_style(),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((state.scroll as u16, 0))
            .render(body_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_wraps_greedily() {
        let paras = vec!["aa bb cc dd".to_string()];
        // Width 5 fits "aa bb" / "cc dd".
        assert_eq!(body_line_count(&paras, 5), 2);
        // Width 11 fits the whole paragraph.
        assert_eq!(body_line_count(&paras, 11), 1);
    }

    #[test]
    fn line_count_separates_paragraphs_with_a_blank() {
        let paras = vec!["aaaa".to_string(), "bbbb".to_string()];
        assert_eq!(body_line_count(&paras, 10), 3);
    }

    #[test]
    fn line_count_breaks_overlong_words() {
        let paras = vec!["abcdefghij".to_string()];
        assert_eq!(body_line_count(&paras, 4), 3);
    }

    #[test]
    fn line_count_handles_degenerate_input() {
        assert_eq!(body_line_count(&[], 10), 0);
        assert_eq!(body_line_count(&["hello".to_string()], 0), 0);
        assert_eq!(body_line_count(&[String::new()], 10), 1);
    }

    #[test]
    fn scroll_is_bounded() {
        let mut state = SheetWidgetState::default();
        state.scroll_up();
        assert_eq!(state.scroll, 0);
        state.scroll_down(2);
        state.scroll_down(2);
        state.scroll_down(2);
        assert_eq!(state.scroll, 2);
    }
}
