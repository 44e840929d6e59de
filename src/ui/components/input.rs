use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text entry with a block cursor at the end of the text.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Tail of the value that fits in `width` cells, leaving room for the cursor.
    fn visible_value(&self, width: usize) -> &'a str {
        let room = width.saturating_sub(1);
        let count = self.value.chars().count();
        if count <= room {
            return self.value;
        }
        let skip = count - room;
        match self.value.char_indices().nth(skip) {
            Some((idx, _)) => &self.value[idx..],
            None => "",
        }
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.value.is_empty() && !self.placeholder.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", Theme::selected()));
            }
            spans.push(Span::styled(self.placeholder, Theme::dim()));
            Line::from(spans)
        } else if self.focused {
            Line::from(vec![
                Span::raw(self.visible_value(inner.width as usize)),
                Span::styled(" ", Theme::selected()),
            ])
        } else {
            Line::from(self.visible_value(inner.width as usize + 1))
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_input_scrolls_to_tail() {
        let input = InputWidget::new("Ask", "when to water the corn");
        assert_eq!(input.visible_value(6), " corn");
        assert_eq!(input.visible_value(80), "when to water the corn");
    }

    #[test]
    fn multibyte_input_is_split_on_char_boundaries() {
        let input = InputWidget::new("Ask", "°C°C°C");
        assert_eq!(input.visible_value(3), "°C");
    }
}
