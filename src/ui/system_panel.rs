use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::analysis::AlertSummary;
use crate::format::format_mb;
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::status::StatusLevel;
use crate::ui::theme::Theme;

/// "Current System Status" block.
pub fn render_status(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Current System Status ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    let label = Style::default()
        .fg(theme.section_title)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text_primary);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("CPU: ", label),
            Span::styled(
                format!("{} ({} cores)", snapshot.cpu_model, snapshot.cpu_core_count),
                text,
            ),
        ]),
        Line::styled(format!("  Usage: {:.1}%", snapshot.cpu_usage_percent), text),
        Line::styled(
            format!(
                "  Load Average: {:.2}, {:.2}, {:.2}",
                snapshot.load_average.one, snapshot.load_average.five, snapshot.load_average.fifteen
            ),
            text,
        ),
        Line::from(vec![
            Span::styled("Memory: ", label),
            Span::styled(
                format!(
                    "{:.1}GB used / {:.1}GB total ({:.1}%)",
                    snapshot.memory_used_gb(),
                    snapshot.memory_total_gb(),
                    snapshot.memory_used_percent()
                ),
                text,
            ),
        ]),
    ];

    if snapshot.swap_used_bytes > 0 {
        lines.push(Line::styled(
            format!(
                "  Swap: {} used / {} total",
                format_mb(snapshot.swap_used_bytes),
                format_mb(snapshot.swap_total_bytes)
            ),
            text,
        ));
    }
    lines.push(Line::styled(
        format!("  Memory Pressure: {}", snapshot.memory_pressure),
        text,
    ));
    if !snapshot.gpu_model.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("GPU: ", label),
            Span::styled(snapshot.gpu_model.clone(), text),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// "Active Alerts" banner, or the all-clear line when nothing urgent fired.
pub fn render_alerts(frame: &mut Frame, area: Rect, alerts: AlertSummary, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let lines = if alerts.is_healthy() {
        vec![Line::styled(
            "✅ System Status: Good",
            Style::default()
                .fg(theme.level_color(StatusLevel::Good))
                .add_modifier(Modifier::BOLD),
        )]
    } else {
        let mut lines = vec![Line::styled(
            "🚨 Active Alerts",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )];
        if alerts.critical > 0 {
            lines.push(Line::styled(
                format!(
                    "● CRITICAL: {} issue(s) need immediate attention",
                    alerts.critical
                ),
                Style::default().fg(theme.level_color(StatusLevel::Critical)),
            ));
        }
        if alerts.high > 0 {
            lines.push(Line::styled(
                format!("● HIGH: {} issue(s) affecting performance", alerts.high),
                Style::default().fg(theme.level_color(StatusLevel::Warning)),
            ));
        }
        lines
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
