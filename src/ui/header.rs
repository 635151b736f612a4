use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::status::QuickStatus;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    last_update: Option<DateTime<Local>>,
    collector_name: &str,
    refresh_interval: Duration,
    quick_status: &[QuickStatus],
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let updated = last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let branding = Line::from(vec![
        Span::styled(
            " bottleneck ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " System Bottleneck Monitor",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Last updated: {updated}"),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{collector_name} · every {}s",
                refresh_interval.as_secs_f64().round() as u64
            ),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    let mut spans = vec![Span::styled(
        "Quick Status ",
        Style::default()
            .fg(theme.section_title)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, entry) in quick_status.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme.text_secondary)));
        }
        spans.push(Span::styled(
            format!("{}: ", entry.label),
            Style::default().fg(theme.text_primary),
        ));
        spans.push(Span::styled(
            entry.value.clone(),
            Style::default()
                .fg(theme.level_color(entry.level))
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(vec![branding, Line::from(spans)]), inner);
}
