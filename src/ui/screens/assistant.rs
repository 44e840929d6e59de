use crate::assistant::{Message, Role};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AssistantScreen<'a> {
    pub transcript: &'a [Message],
    pub input: &'a str,
}

impl<'a> AssistantScreen<'a> {
    pub fn new(transcript: &'a [Message], input: &'a str) -> Self {
        Self { transcript, input }
    }

    fn transcript_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for message in self.transcript {
            let (who, style) = match message.role {
                Role::User => ("You", Theme::user_message()),
                Role::Assistant => ("Assistant", Theme::title()),
            };
            lines.push(Line::from(Span::styled(who, style)));
            lines.extend(
                message
                    .content
                    .lines()
                    .map(|l| Line::from(Span::styled(l, Theme::normal()))),
            );
            lines.push(Line::default());
        }
        lines
    }
}

impl Widget for AssistantScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(5),    // Transcript
                Constraint::Length(3), // Input
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Farmer Assistant", Theme::title()),
            Span::styled(" (scripted replies)", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(chunks[1]);

        let lines = self.transcript_lines();
        let scroll = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(chunks[1], buf);

        InputWidget::new("Message", self.input)
            .placeholder("Ask a question or give a command...")
            .focused(true)
            .render(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Send ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[Ctrl-C]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

/// Rows the lines occupy once wrapped to `width`, counting blank lines as one.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(width as usize))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Assistant;

    #[test]
    fn wrapped_height_counts_rows() {
        let lines = vec![Line::from("abcdef"), Line::default(), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 3), 4);
        assert_eq!(wrapped_height(&lines, 10), 3);
        assert_eq!(wrapped_height(&lines, 0), 0);
    }

    #[test]
    fn renders_latest_reply() {
        let mut assistant = Assistant::new();
        assistant.send("pump on");

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        AssistantScreen::new(assistant.transcript(), "").render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("TURN ON - Starting irrigation."));
        assert!(text.contains("Ask a question or give a command..."));
    }
}
