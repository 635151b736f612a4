use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::analysis::{Recommendation, Severity, group_by_severity};
use crate::ui::status::StatusLevel;
use crate::ui::theme::Theme;

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🚨",
        Severity::High => "⚠️",
        Severity::Medium => "📋",
        Severity::Low => "💡",
    }
}

/// Lines the panel renders before wrapping: one header per severity group,
/// a blank line between groups, two lines per finding.
pub fn line_count(recommendations: &[Recommendation]) -> usize {
    if recommendations.is_empty() {
        return 2;
    }
    let groups = group_by_severity(recommendations).len();
    groups + groups.saturating_sub(1) + recommendations.len() * 2
}

/// Findings grouped by severity, most urgent first, scrolled to `scroll`.
/// Clipped content is announced on the bottom border.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    recommendations: &[Recommendation],
    scroll: u16,
    theme: &Theme,
) {
    let lines = if recommendations.is_empty() {
        vec![
            Line::styled(
                "✅ Great! No bottlenecks detected",
                Style::default()
                    .fg(theme.level_color(StatusLevel::Good))
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Your system appears to be running optimally.",
                Style::default().fg(theme.text_secondary),
            ),
        ]
    } else {
        recommendation_lines(recommendations, theme)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Upgrade Recommendations ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    let total = wrapped_height(&lines, inner.width);
    let offset = scroll.min(total.saturating_sub(inner.height));
    let below = total.saturating_sub(offset + inner.height);

    let hint = Style::default().fg(theme.text_secondary);
    if offset > 0 {
        block = block.title_bottom(Line::styled(format!(" ↑ {offset} above "), hint));
    }
    if below > 0 {
        block = block
            .title_bottom(Line::styled(format!(" ↓ {below} more lines "), hint).right_aligned());
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((offset, 0)),
        area,
    );
}

/// Rows the lines occupy at `width`, counting each line as at least one row.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width as usize).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn recommendation_lines<'a>(recommendations: &'a [Recommendation], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for group in group_by_severity(recommendations) {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        let color = theme.severity_color(group.severity);
        lines.push(Line::styled(
            format!("{} {}", severity_icon(group.severity), group.severity.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

        for rec in group.recommendations {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::styled(
                    rec.component.label(),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" ({})", rec.reason),
                    Style::default().fg(theme.text_primary),
                ),
            ]));
            lines.push(Line::styled(
                format!("  → {}", rec.suggestion),
                Style::default().fg(theme.text_secondary),
            ));
        }
    }

    lines
}
