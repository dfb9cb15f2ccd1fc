//! Popup overlay widget for the help screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

/// Help popup listing the current key bindings and mouse gestures.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() as u16) + 10;
        let popup = centered_fixed(46, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(Color::White);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for &action in Action::ALL {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", self.config.display_bindings(action)), key_style),
                Span::styled(action.label(), label_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  drag handle   ", key_style),
            Span::styled("pull the sheet, release to snap", label_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  tap handle    ", key_style),
            Span::styled("toggle open / closed", label_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  scroll wheel  ", key_style),
            Span::styled("scroll the sheet body", label_style),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// A fixed-size rect centered within `area`, clamped to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
