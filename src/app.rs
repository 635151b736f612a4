use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::analysis::{self, AlertSummary, Recommendation};
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::system::collector::MetricsCollector;
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::recommendations::line_count;
use crate::ui::theme::{ColorSupport, Theme, resolve_color_support};

/// How long a status-bar message stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Details,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub refresh: KeyCode,
    pub advice: KeyCode,
    pub details: KeyCode,
    pub help: KeyCode,
    pub clear: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('s')),
            advice: parse_key(&kb.advice).unwrap_or(KeyCode::Char('a')),
            details: parse_key(&kb.details).unwrap_or(KeyCode::Char('d')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('h')),
            clear: parse_key(&kb.clear).unwrap_or(KeyCode::Char('c')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.advice), "Refresh advice and recommendations"),
            (key_label(self.details), "Show detailed system information"),
            (key_label(self.refresh), "Refresh system status"),
            (key_label(self.clear), "Clear screen"),
            (key_label(self.help), "Show help"),
            (key_label(self.quit), "Quit monitor"),
            ("↑/↓".to_string(), "Scroll recommendations"),
            ("Esc".to_string(), "Back to dashboard"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

/// Loop controller: owns the collector, the latest snapshot and the findings
/// derived from it.
pub struct App {
    pub running: bool,
    pub view: View,
    collector: Box<dyn MetricsCollector>,
    pub snapshot: MetricsSnapshot,
    pub recommendations: Vec<Recommendation>,
    /// First visible line of the recommendations panel.
    pub recommendations_scroll: u16,
    pub last_update: Option<DateTime<Local>>,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
    pub status_message: Option<(String, Instant)>,
    pub refresh_interval: Duration,
    clear_requested: bool,
}

impl App {
    /// Builds the app and takes the first reading so the first frame has data.
    pub fn new(config: &Config, collector: Box<dyn MetricsCollector>) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let theme = Theme::from_config(&config.general.theme, color_support);

        let mut app = App {
            running: true,
            view: View::Dashboard,
            collector,
            snapshot: MetricsSnapshot::default(),
            recommendations: Vec::new(),
            recommendations_scroll: 0,
            last_update: None,
            theme,
            color_support,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            status_message: None,
            refresh_interval: Duration::from_millis(config.general.refresh_rate_ms),
            clear_requested: false,
        };
        app.refresh_data();
        app
    }

    pub fn collector_name(&self) -> &'static str {
        self.collector.name()
    }

    pub fn refresh_data(&mut self) {
        self.snapshot = self.collector.collect();
        self.recommendations = analysis::analyze(&self.snapshot);
        self.recommendations_scroll = self.recommendations_scroll.min(self.max_scroll());
        self.last_update = Some(Local::now());

        tracing::debug!(
            collector = self.collector.name(),
            findings = self.recommendations.len(),
            cpu = self.snapshot.cpu_usage_percent,
            memory = self.snapshot.memory_used_percent(),
            "refreshed"
        );

        self.expire_status();
    }

    pub fn expire_status(&mut self) {
        if let Some((_, created)) = &self.status_message
            && created.elapsed() >= STATUS_TTL
        {
            self.status_message = None;
        }
    }

    pub fn visible_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, created)| created.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn alert_summary(&self) -> AlertSummary {
        AlertSummary::from_recommendations(&self.recommendations)
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.view {
            View::Dashboard => self.map_key_dashboard(key),
            View::Details => self.map_key_overlay(key, self.keybinds.details),
            View::Help => self.map_key_overlay(key, self.keybinds.help),
        }
    }

    fn map_key_dashboard(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.refresh || code == kb.advice {
            return Action::Refresh;
        }
        if code == kb.details {
            return Action::ShowDetails;
        }
        if code == kb.help || code == KeyCode::Char('?') {
            return Action::ShowHelp;
        }
        if code == kb.clear {
            return Action::Clear;
        }

        match code {
            KeyCode::Esc | KeyCode::Enter => Action::ShowDashboard,
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::Unknown(c)
            }
            _ => Action::None,
        }
    }

    fn map_key_overlay(&self, key: KeyEvent, own_key: KeyCode) -> Action {
        let code = key.code;
        if code == self.keybinds.quit {
            return Action::Quit;
        }
        if code == KeyCode::Esc || code == KeyCode::Enter || code == own_key {
            return Action::ShowDashboard;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => {
                self.refresh_data();
                self.set_status("Refreshed system status and recommendations");
            }
            Action::ShowDetails => self.view = View::Details,
            Action::ShowHelp => self.view = View::Help,
            Action::ShowDashboard => self.view = View::Dashboard,
            Action::ScrollUp => {
                self.recommendations_scroll = self.recommendations_scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                self.recommendations_scroll =
                    (self.recommendations_scroll + 1).min(self.max_scroll());
            }
            Action::Clear => {
                self.view = View::Dashboard;
                self.status_message = None;
                self.clear_requested = true;
            }
            Action::Unknown(c) => {
                let help = key_label(self.keybinds.help);
                self.set_status(format!("Unknown command: '{c}'. Press {help} for help."));
            }
            Action::None => {}
        }
    }

    /// True once after a clear was requested; the loop then wipes the terminal.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn max_scroll(&self) -> u16 {
        let lines = line_count(&self.recommendations).saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;
    use crate::system::snapshot::{LoadAverage, MemoryPressure};
    use std::cell::Cell;
    use std::rc::Rc;

    const GB: u64 = 1024 * 1024 * 1024;

    struct FixedCollector {
        snapshot: MetricsSnapshot,
        calls: Rc<Cell<usize>>,
    }

    impl MetricsCollector for FixedCollector {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn collect(&mut self) -> MetricsSnapshot {
            self.calls.set(self.calls.get() + 1);
            self.snapshot.clone()
        }
    }

    fn busy_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_usage_percent: 95.0,
            load_average: LoadAverage::uniform(2.0),
            cpu_core_count: 8,
            cpu_model: "AMD Ryzen 7 5800X".to_string(),
            memory_total_bytes: 32 * GB,
            memory_used_bytes: 8 * GB,
            memory_pressure: MemoryPressure::Normal,
            gpu_model: "Apple M2".to_string(),
            ..Default::default()
        }
    }

    fn make_app() -> (App, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let collector = FixedCollector {
            snapshot: busy_snapshot(),
            calls: Rc::clone(&calls),
        };
        let app = App::new(&Config::default(), Box::new(collector));
        (app, calls)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn new_collects_and_analyzes_once() {
        let (app, calls) = make_app();
        assert_eq!(calls.get(), 1);
        assert!(app.last_update.is_some());
        assert_eq!(app.collector_name(), "fixed");
        assert_eq!(app.refresh_interval, Duration::from_secs(10));
        assert_eq!(app.recommendations.len(), 2);
        assert_eq!(app.recommendations[0].severity, Severity::Critical);
        assert_eq!(app.alert_summary().critical, 1);
    }

    #[test]
    fn refresh_action_recollects() {
        let (mut app, calls) = make_app();
        app.dispatch(Action::Refresh);
        assert_eq!(calls.get(), 2);
        assert!(app.visible_status().is_some());
    }

    #[test]
    fn default_keybinds_on_dashboard() {
        let (app, _) = make_app();
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(press(KeyCode::Char('s'))), Action::Refresh);
        assert_eq!(app.map_key(press(KeyCode::Char('a'))), Action::Refresh);
        assert_eq!(app.map_key(press(KeyCode::Char('d'))), Action::ShowDetails);
        assert_eq!(app.map_key(press(KeyCode::Char('h'))), Action::ShowHelp);
        assert_eq!(app.map_key(press(KeyCode::Char('?'))), Action::ShowHelp);
        assert_eq!(app.map_key(press(KeyCode::Char('c'))), Action::Clear);
        assert_eq!(app.map_key(press(KeyCode::Char('x'))), Action::Unknown('x'));
        assert_eq!(app.map_key(press(KeyCode::Up)), Action::ScrollUp);
        assert_eq!(app.map_key(press(KeyCode::Down)), Action::ScrollDown);
        assert_eq!(app.map_key(press(KeyCode::Left)), Action::None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let (mut app, _) = make_app();
        app.keybinds.quit = KeyCode::Char('x');

        assert_eq!(app.map_key(press(KeyCode::Char('x'))), Action::Quit);
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::Unknown('q'));
    }

    #[test]
    fn details_view_returns_on_esc_enter_or_own_key() {
        let (mut app, _) = make_app();
        app.dispatch(Action::ShowDetails);
        assert_eq!(app.view, View::Details);

        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('d')] {
            assert_eq!(app.map_key(press(code)), Action::ShowDashboard);
        }
        assert_eq!(app.map_key(press(KeyCode::Char('s'))), Action::None);
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::Quit);

        app.dispatch(Action::ShowDashboard);
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn help_view_blocks_other_keys() {
        let (mut app, _) = make_app();
        app.dispatch(Action::ShowHelp);
        assert_eq!(app.view, View::Help);

        assert_eq!(app.map_key(press(KeyCode::Char('d'))), Action::None);
        assert_eq!(app.map_key(press(KeyCode::Char('h'))), Action::ShowDashboard);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn unknown_command_sets_status() {
        let (mut app, _) = make_app();
        app.dispatch(Action::Unknown('z'));
        assert_eq!(
            app.visible_status(),
            Some("Unknown command: 'z'. Press h for help.")
        );
    }

    #[test]
    fn clear_resets_view_once() {
        let (mut app, _) = make_app();
        app.dispatch(Action::ShowHelp);
        app.dispatch(Action::Clear);
        assert_eq!(app.view, View::Dashboard);
        assert!(app.take_clear_request());
        assert!(!app.take_clear_request());
    }

    #[test]
    fn expired_status_is_dropped() {
        let (mut app, _) = make_app();
        let stale = Instant::now()
            .checked_sub(STATUS_TTL + Duration::from_millis(10))
            .unwrap();
        app.status_message = Some(("old".to_string(), stale));
        assert_eq!(app.visible_status(), None);
        app.expire_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn scroll_is_bounded_by_recommendation_lines() {
        let (mut app, _) = make_app();
        // critical cpu + low gpu: 2 headers, 1 blank, 4 entry lines
        assert_eq!(line_count(&app.recommendations), 7);

        app.dispatch(Action::ScrollUp);
        assert_eq!(app.recommendations_scroll, 0);

        for _ in 0..20 {
            app.dispatch(Action::ScrollDown);
        }
        assert_eq!(app.recommendations_scroll, 6);

        app.dispatch(Action::ScrollUp);
        assert_eq!(app.recommendations_scroll, 5);
    }

    #[test]
    fn quit_stops_loop() {
        let (mut app, _) = make_app();
        app.dispatch(Action::Quit);
        assert!(!app.running);
    }
}
