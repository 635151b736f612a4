use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::format::{format_gb, format_uptime, truncate_unicode};
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const MODEL_WIDTH: usize = 48;

/// Hardware, performance and uptime overlay.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
    let lines = detail_lines(snapshot, theme);

    let width = 72u16.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Detailed System Information ",
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

fn detail_lines(s: &MetricsSnapshot, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |title: &'static str| {
        Line::styled(
            title,
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        )
    };
    let text = Style::default().fg(theme.text_primary);

    let mut lines = vec![
        heading("System Hardware:"),
        Line::styled(
            format!(
                "  CPU: {} ({} cores)",
                truncate_unicode(&s.cpu_model, MODEL_WIDTH),
                s.cpu_core_count
            ),
            text,
        ),
    ];
    if s.has_gpu_identity() {
        lines.push(Line::styled(
            format!("  GPU: {}", truncate_unicode(&s.gpu_model, MODEL_WIDTH)),
            text,
        ));
    }
    lines.push(Line::styled(
        format!("  Total RAM: {}", format_gb(s.memory_total_bytes)),
        text,
    ));

    lines.push(Line::raw(""));
    lines.push(heading("Performance Metrics:"));
    lines.push(Line::styled(
        format!("  CPU Usage: {:.1}%", s.cpu_usage_percent),
        text,
    ));
    lines.push(Line::styled(
        format!(
            "  Load Averages: {:.2} (1m), {:.2} (5m), {:.2} (15m)",
            s.load_average.one, s.load_average.five, s.load_average.fifteen
        ),
        text,
    ));
    lines.push(Line::styled(
        format!(
            "  Memory Usage: {:.1}% ({:.1}GB used)",
            s.memory_used_percent(),
            s.memory_used_gb()
        ),
        text,
    ));
    if s.swap_used_bytes > 0 {
        lines.push(Line::styled(
            format!("  Swap Usage: {}", format_gb(s.swap_used_bytes)),
            text,
        ));
    }
    lines.push(Line::styled(
        format!("  Memory Pressure: {}", s.memory_pressure),
        text,
    ));

    if s.uptime_secs > 0 {
        lines.push(Line::raw(""));
        lines.push(heading("System Uptime:"));
        lines.push(Line::styled(format!("  {}", format_uptime(s.uptime_secs)), text));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Esc / Enter: back to monitor",
        Style::default().fg(theme.text_secondary),
    ));
    lines
}
