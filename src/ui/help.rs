use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::analysis::Severity;
use crate::ui::centered_rect;
use crate::ui::recommendations::severity_icon;
use crate::ui::status::StatusLevel;
use crate::ui::theme::Theme;

/// Renders a centered help overlay: what the tool does, how to read it, and
/// every keybind → description pair.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &str)],
    refresh_interval: Duration,
    theme: &Theme,
) {
    let lines = help_lines(entries, refresh_interval, theme);

    let width = 64u16.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2)); // +2 for borders
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Help & Usage Guide ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(theme.surface_bg))
            .wrap(Wrap { trim: false }),
        overlay,
    );
}

fn help_lines<'a>(
    entries: &'a [(String, &str)],
    refresh_interval: Duration,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let heading = |title: &'static str| {
        Line::styled(
            title,
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        )
    };
    let text = Style::default().fg(theme.pill_desc_fg);

    let mut lines = vec![
        heading("What This Tool Does:"),
        Line::styled("• Continuously monitors CPU, Memory, and GPU performance", text),
        Line::styled("• Provides real-time bottleneck detection", text),
        Line::styled("• Shows detailed upgrade recommendations by default", text),
        Line::styled(
            format!(
                "• Updates every {} seconds automatically",
                refresh_interval.as_secs_f64().round() as u64
            ),
            text,
        ),
        Line::raw(""),
        heading("Status Indicators:"),
    ];

    for (level, meaning) in [
        (StatusLevel::Good, "Good performance"),
        (StatusLevel::Warning, "Moderate usage/warning"),
        (StatusLevel::Critical, "High usage/critical issue"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("• {}", level.label()),
                Style::default()
                    .fg(theme.level_color(level))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {meaning}"), text),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Recommendation Levels:"));
    for severity in Severity::PRIORITY {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {}", severity_icon(severity), severity.label()),
                Style::default()
                    .fg(theme.severity_color(severity))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {}", severity.description()), text),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Keys:"));
    lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(
                format!(" {key:>6} "),
                Style::default()
                    .fg(theme.pill_key_fg)
                    .bg(theme.pill_key_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {desc}"), text),
        ])
    }));

    lines.push(Line::raw(""));
    lines.push(heading("Tips for Best Results:"));
    for tip in [
        "• Let it run for a few minutes to see usage patterns",
        "• Use during your typical workload for accurate assessment",
        "• Address CRITICAL issues first for best performance gains",
    ] {
        lines.push(Line::styled(tip, text));
    }

    lines
}
