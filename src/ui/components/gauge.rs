use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    marker: Option<f64>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            marker: None,
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Draw a tick on the bar at this value.
    pub fn marker(mut self, value: f64) -> Self {
        self.marker = Some(value);
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }

    fn ratio(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
            Paragraph::new(na_line).render(inner, buf);
            return;
        };

        let color = self.get_color(value);
        let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);
        let value_line = Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
        Paragraph::new(value_line).render(inner, buf);

        if inner.height < 2 {
            return;
        }

        let bar_area = Rect {
            x: inner.x,
            y: inner.y + 1,
            width: inner.width,
            height: 1,
        };

        self.render_bar(bar_area, value, buf);
    }
}

impl GaugeWidget<'_> {
    fn render_bar(&self, bar_area: Rect, value: f64, buf: &mut Buffer) {
        let color = self.get_color(value);
        let filled = (bar_area.width as f64 * self.ratio(value)) as u16;
        for x in bar_area.x..bar_area.x + bar_area.width {
            let ch = if x < bar_area.x + filled { '█' } else { '░' };
            buf[(x, bar_area.y)].set_char(ch).set_fg(color);
        }

        if let Some(marker) = self.marker.filter(|_| bar_area.width > 0) {
            let offset = (bar_area.width.saturating_sub(1) as f64 * self.ratio(marker)) as u16;
            buf[(bar_area.x + offset, bar_area.y)]
                .set_char('│')
                .set_fg(Theme::FG);
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(0.0, 50.0)
        .thresholds(vec![
            (f64::MIN, Theme::TEMP_COLD),
            (15.0, Theme::TEMP_MILD),
            (32.0, Theme::TEMP_WARM),
            (38.0, Theme::TEMP_HOT),
        ])
}

/// Soil moisture gauge with the irrigation threshold marked on the bar.
pub fn moisture_gauge(title: &str, value: Option<f64>, threshold_pct: f64) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .marker(threshold_pct)
        .thresholds(vec![
            (f64::MIN, Theme::MOISTURE_DRY),
            (threshold_pct, Theme::MOISTURE_OK),
            (threshold_pct + 30.0, Theme::MOISTURE_WET),
        ])
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (f64::MIN, Theme::WARNING),
            (30.0, Theme::SUCCESS),
            (90.0, Theme::MOISTURE_WET),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_highest_threshold_reached() {
        let gauge = temperature_gauge("Air", Some(40.0));
        assert_eq!(gauge.get_color(40.0), Theme::TEMP_HOT);
        assert_eq!(gauge.get_color(33.0), Theme::TEMP_WARM);
        assert_eq!(gauge.get_color(-5.0), Theme::TEMP_COLD);

        let gauge = moisture_gauge("Soil", Some(45.0), 50.0);
        assert_eq!(gauge.get_color(45.0), Theme::MOISTURE_DRY);
        assert_eq!(gauge.get_color(55.0), Theme::MOISTURE_OK);
    }

    #[test]
    fn renders_value_and_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        moisture_gauge("Soil", Some(50.0), 40.0).render(area, &mut buf);

        let value_row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(value_row.starts_with("50.0%"));

        let bar_row: String = (1..19).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(bar_row.contains('█'));
        assert!(bar_row.contains('░'));
        assert!(bar_row.contains('│'));
    }

    #[test]
    fn marker_skipped_without_bar_width() {
        let area = Rect::new(0, 0, 2, 4);
        let mut buf = Buffer::empty(area);
        let gauge = moisture_gauge("Soil", Some(50.0), 40.0);
        gauge.render_bar(Rect::new(1, 2, 0, 1), 50.0, &mut buf);
        assert!((0..area.width).all(|x| buf[(x, 2)].symbol() == " "));
    }

    #[test]
    fn missing_value_shows_na() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        humidity_gauge("Humidity", None).render(area, &mut buf);
        let row: String = (1..4).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "N/A");
    }
}
