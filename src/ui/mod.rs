pub mod details;
pub mod header;
pub mod help;
pub mod recommendations;
pub mod status;
pub mod statusbar;
pub mod system_panel;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use crate::app::{App, View};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let quick = status::quick_status(&app.snapshot);
    header::render(
        frame,
        chunks[0],
        app.last_update,
        app.collector_name(),
        app.refresh_interval,
        &quick,
        &app.theme,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(5)])
        .split(body[0]);

    system_panel::render_status(frame, left[0], &app.snapshot, &app.theme);
    system_panel::render_alerts(frame, left[1], app.alert_summary(), &app.theme);
    recommendations::render(
        frame,
        body[1],
        &app.recommendations,
        app.recommendations_scroll,
        &app.theme,
    );

    statusbar::render(
        frame,
        chunks[2],
        app.view,
        app.visible_status(),
        &app.keybinds,
        &app.theme,
    );

    // Overlays last so they sit on top
    match app.view {
        View::Dashboard => {}
        View::Details => details::render(frame, frame.area(), &app.snapshot, &app.theme),
        View::Help => help::render(
            frame,
            frame.area(),
            &app.help_entries(),
            app.refresh_interval,
            &app.theme,
        ),
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}

#[cfg(test)]
mod tests;
