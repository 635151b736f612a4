use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, View, key_label};
use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: View,
    status_message: Option<&str>,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some(msg) = status_message {
        let color = if msg.starts_with("Unknown") {
            theme.status_critical
        } else {
            theme.status_good
        };
        let line = Line::from(Span::styled(
            format!(" {}", truncate_unicode(msg, area.width.saturating_sub(1) as usize)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    match view {
        View::Dashboard => {
            spans.extend(pill_spans(key_label(keybinds.advice), "Advice", theme));
            spans.extend(pill_spans(key_label(keybinds.details), "Details", theme));
            spans.extend(pill_spans(key_label(keybinds.refresh), "Status", theme));
            spans.extend(pill_spans(key_label(keybinds.clear), "Clear", theme));
            spans.extend(pill_spans(key_label(keybinds.help), "Help", theme));
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
        }
        View::Details | View::Help => {
            spans.extend(pill_spans("Esc".to_string(), "Back", theme));
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: String, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
