use crate::logic::calculations::fmt_one_decimal;
use crate::logic::Evaluation;
use crate::models::SensorSnapshot;
use crate::ui::components::{humidity_gauge, moisture_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct DashboardScreen<'a> {
    pub farm_name: &'a str,
    pub snapshot: &'a SensorSnapshot,
    pub evaluation: &'a Evaluation,
    pub pump_running: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(farm_name: &'a str, snapshot: &'a SensorSnapshot, evaluation: &'a Evaluation) -> Self {
        Self {
            farm_name,
            snapshot,
            evaluation,
            pump_running: false,
            status_message: None,
        }
    }

    pub fn pump_running(mut self, running: bool) -> Self {
        self.pump_running = running;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Gauges row
                Constraint::Min(12),   // Panels
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(4)])
            .split(columns[1]);

        self.render_health(left[0], buf);
        self.render_irrigation(left[1], buf);
        self.render_moisture_trend(right[0], buf);
        self.render_alerts(right[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let mode = if self.snapshot.auto_mode {
            "Auto"
        } else {
            "Manual"
        };
        let title = format!(
            "AgriSense - {} ({} - {} irrigation)",
            self.farm_name, self.snapshot.crop, mode
        );

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = format!(
            "Threshold: {}%   Last evaluated: {}",
            self.snapshot.moisture_threshold_pct,
            self.evaluation
                .evaluated_at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        moisture_gauge(
            "Soil Moisture",
            Some(self.snapshot.soil_moisture_pct),
            self.snapshot.moisture_threshold_pct,
        )
        .render(gauge_chunks[0], buf);
        temperature_gauge("Temperature", Some(self.snapshot.temperature_c))
            .render(gauge_chunks[1], buf);
        humidity_gauge("Humidity", Some(self.snapshot.humidity_pct)).render(gauge_chunks[2], buf);
    }

    fn render_health(&self, area: Rect, buf: &mut Buffer) {
        let health = &self.evaluation.health;
        let block = Block::default()
            .title(Span::styled("Crop Health", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let condition_style = Style::default().fg(health.condition.color());
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} {}", health.condition.symbol(), health.condition),
                    condition_style,
                ),
                Span::styled(format!("  {}/100", health.score), Theme::dim()),
            ]),
            Line::from(Span::styled(&health.description, Theme::normal())),
        ];

        if health.action_required {
            lines.push(Line::from(Span::styled("Action required", Theme::error())));
        }
        lines.push(Line::default());
        lines.extend(
            health
                .suggestions
                .iter()
                .map(|s| Line::from(Span::styled(format!("• {}", s), Theme::dim()))),
        );

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_irrigation(&self, area: Rect, buf: &mut Buffer) {
        let decision = &self.evaluation.irrigation;
        let block = Block::default()
            .title(Span::styled("Irrigation", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Pump ", Theme::normal()),
                Span::styled(
                    decision.pump_status.as_str(),
                    Style::default().fg(decision.pump_status.color()),
                ),
            ]),
            Line::from(Span::styled(&decision.reason, Theme::dim())),
        ];

        if !self.snapshot.auto_mode {
            let (label, style) = if self.pump_running {
                ("Water flowing", Style::default().fg(Theme::WATER))
            } else {
                ("Pump stopped", Theme::dim())
            };
            lines.push(Line::from(Span::styled(label, style)));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_moisture_trend(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Moisture Trend", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let spark = sparkline(&self.snapshot.moisture_history, inner.width as usize);
        let mut lines = vec![Line::from(Span::styled(
            spark,
            Style::default().fg(Theme::WATER),
        ))];

        match &self.evaluation.prediction {
            Some(p) => {
                lines.push(Line::from(vec![
                    Span::styled("Next: ", Theme::dim()),
                    Span::styled(
                        format!("{}%", fmt_one_decimal(p.predicted_moisture_pct)),
                        Theme::highlight(),
                    ),
                    Span::styled(format!("  {}", p.trend), Theme::normal()),
                ]));
                let (msg, style) = if p.needs_irrigation {
                    ("Irrigation needed soon", Theme::warning())
                } else {
                    ("No irrigation needed", Theme::success())
                };
                lines.push(Line::from(Span::styled(msg, style)));
            }
            None => lines.push(Line::from(Span::styled(
                "Not enough history to predict",
                Theme::dim(),
            ))),
        }

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_alerts(&self, area: Rect, buf: &mut Buffer) {
        let alerts = &self.evaluation.alerts;
        let high = self.evaluation.high_alert_count();
        let title = if high > 0 {
            format!("Alerts ({} high)", high)
        } else {
            "Alerts".to_string()
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if alerts.is_empty() {
            Paragraph::new(Span::styled("✓ All Clear", Theme::success())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = alerts
            .iter()
            .map(|a| {
                let level_style = Style::default().fg(a.level.color());
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("{} ", a.level.symbol()), level_style),
                    Span::styled(&a.alert_type, level_style),
                    Span::styled(format!(" - {}", a.message), Theme::normal()),
                ])];
                if !a.action.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", a.action),
                        Theme::dim(),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::success())).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Assistant ", Theme::nav_label()),
            Span::styled("[a]", Theme::nav_key()),
            Span::styled("Auto/Manual ", Theme::nav_label()),
            Span::styled("[c/C]", Theme::nav_key()),
            Span::styled("Crop ", Theme::nav_label()),
            Span::styled("[+/-]", Theme::nav_key()),
            Span::styled("Threshold ", Theme::nav_label()),
            Span::styled("[p]", Theme::nav_key()),
            Span::styled("Pump ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Read ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

/// One bar per reading on a 0-100% scale, keeping the most recent that fit.
fn sparkline(values: &[f64], width: usize) -> String {
    let start = values.len().saturating_sub(width);
    values[start..]
        .iter()
        .map(|v| {
            let level = (v.clamp(0.0, 100.0) / 100.0 * (SPARK_LEVELS.len() - 1) as f64).round();
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::DecisionEngine;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn sparkline_scales_and_truncates() {
        assert_eq!(sparkline(&[0.0, 100.0, 50.0], 10), "▁█▅");
        assert_eq!(sparkline(&[0.0, 100.0, 50.0], 2), "█▅");
        assert_eq!(sparkline(&[], 5), "");
    }

    #[test]
    fn renders_alerts_and_prediction() {
        let snapshot = SensorSnapshot::new(30.0, 40.0, 20.0)
            .with_threshold(50.0)
            .with_history(vec![40.0, 42.0, 44.0]);
        let evaluation = DecisionEngine::default().evaluate(&snapshot);

        let area = Rect::new(0, 0, 120, 32);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("Test Farm", &snapshot, &evaluation).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("AgriSense - Test Farm (Wheat - Auto irrigation)"));
        assert!(text.contains("Alerts (2 high)"));
        assert!(text.contains("Heat Stress"));
        assert!(text.contains("Pump ON"));
        assert!(text.contains("Irrigation needed soon"));
    }

    #[test]
    fn renders_all_clear() {
        let snapshot = SensorSnapshot::new(55.0, 20.0, 50.0);
        let evaluation = DecisionEngine::default().evaluate(&snapshot);

        let area = Rect::new(0, 0, 120, 32);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("Test Farm", &snapshot, &evaluation).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("All Clear"));
        assert!(text.contains("Not enough history to predict"));
    }
}
